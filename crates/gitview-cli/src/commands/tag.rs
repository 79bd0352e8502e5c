use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use gitview_html::Html;
use gitview_pages::render_tag;

#[derive(Args)]
pub struct TagArgs {
    /// History fixture file (JSON)
    #[arg(long, value_name = "file")]
    pub fixture: PathBuf,

    /// Tag name to display
    #[arg(value_name = "name")]
    pub name: String,
}

pub fn run(args: &TagArgs) -> Result<i32> {
    let (history, ctx, _flags) = super::load_fixture(&args.fixture)?;

    let stdout = io::stdout();
    let mut out = Html::new(stdout.lock());

    match render_tag(&mut out, &ctx, &history, &args.name) {
        Ok(()) => Ok(0),
        Err(err) => super::log::fail(&mut out, err),
    }
}
