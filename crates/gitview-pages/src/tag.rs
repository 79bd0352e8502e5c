//! The single-tag detail page.

use std::io::Write;

use bstr::{BStr, ByteSlice};
use gitview_history::{AnnotatedTag, ObjectKind, ResolvedTag, TagIndex, TagTarget};
use gitview_html::Html;

use crate::age;
use crate::error::PageError;
use crate::links::{commit_href, object_href, snapshot_href};
use crate::options::PageContext;

/// Render the detail page for `name`.
///
/// Resolution happens before anything is written: a missing tag or a
/// corrupt tag object produces an error page with no partial info table.
pub fn render_tag<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    index: &dyn TagIndex,
    name: &str,
) -> Result<(), PageError> {
    let resolved = index
        .resolve_tag(name)?
        .ok_or_else(|| PageError::NotFound(format!("bad tag reference: {}", name)))?;

    match resolved {
        ResolvedTag::Annotated(tag) => render_annotated(out, ctx, name, &tag),
        ResolvedTag::Lightweight(target) => render_lightweight(out, ctx, name, &target),
    }
}

fn render_annotated<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    name: &str,
    tag: &AnnotatedTag,
) -> Result<(), PageError> {
    out.raw("<table class='commit-info'>\n")?;
    out.raw("<tr><td>tag name</td><td>")?;
    out.text(BStr::new(name))?;
    out.raw(&format!(" ({})", tag.id))?;
    out.raw("</td></tr>\n")?;

    if let Some(tagger) = &tag.tagger {
        if tagger.when.secs > 0 {
            out.raw("<tr><td>tag date</td><td>")?;
            out.raw(&age::iso_datetime(tagger.when))?;
            out.raw("</td></tr>\n")?;
        }
        out.raw("<tr><td>tagged by</td><td>")?;
        out.text(tagger.name.as_bstr())?;
        if !tagger.email.is_empty() && !ctx.repo.suppress_email {
            out.raw(" ")?;
            out.text(BStr::new(&format!("<{}>", tagger.email)))?;
        }
        out.raw("</td></tr>\n")?;
    }

    render_target_row(out, ctx, &tag.target)?;
    render_download_rows(out, ctx, name)?;
    out.raw("</table>\n")?;

    render_message(out, tag.message.as_bstr())?;
    Ok(())
}

fn render_lightweight<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    name: &str,
    target: &TagTarget,
) -> Result<(), PageError> {
    out.raw("<table class='commit-info'>\n")?;
    out.raw("<tr><td>tag name</td><td>")?;
    out.text(BStr::new(name))?;
    out.raw("</td></tr>\n")?;
    render_target_row(out, ctx, target)?;
    render_download_rows(out, ctx, name)?;
    out.raw("</table>\n")?;
    Ok(())
}

fn render_target_row<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    target: &TagTarget,
) -> Result<(), PageError> {
    out.raw("<tr><td>tagged object</td><td class='sha1'>")?;
    let href = match target.kind {
        ObjectKind::Commit => commit_href(ctx, &target.id, None),
        _ => object_href(ctx, &target.id),
    };
    out.link_open(&href, None)?;
    out.raw(&format!("{} {}", target.kind.as_str(), target.id))?;
    out.link_close()?;
    out.raw("</td></tr>\n")?;
    Ok(())
}

/// Snapshot download links, one per configured archive suffix.
fn render_download_rows<W: Write>(
    out: &mut Html<W>,
    ctx: &PageContext,
    name: &str,
) -> Result<(), PageError> {
    if ctx.repo.snapshots.is_empty() {
        return Ok(());
    }
    out.raw("<tr><th>download</th><td class='sha1'>")?;
    for (i, suffix) in ctx.repo.snapshots.iter().enumerate() {
        if i > 0 {
            out.raw("&nbsp;")?;
        }
        let filename = format!("{}-{}.{}", ctx.repo.name, snapshot_version(name), suffix);
        out.link_open(&snapshot_href(ctx, &filename), None)?;
        out.text(BStr::new(&filename))?;
        out.link_close()?;
    }
    out.raw("</td></tr>\n")?;
    Ok(())
}

/// Tag names conventionally carry a `v` prefix the archive name drops.
fn snapshot_version(name: &str) -> &str {
    match name.strip_prefix(['v', 'V']) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => name,
    }
}

/// The message body: first line as the subject, the remainder (when a
/// newline exists) as the body, each escaped on its own.
fn render_message<W: Write>(out: &mut Html<W>, message: &BStr) -> Result<(), PageError> {
    let (subject, body) = match message.find_byte(b'\n') {
        Some(pos) => (
            message[..pos].as_bstr(),
            Some(message[pos + 1..].as_bstr()),
        ),
        None => (message, None),
    };
    out.raw("<div class='commit-subject'>")?;
    out.text(subject)?;
    out.raw("</div>")?;
    if let Some(body) = body {
        out.raw("<div class='commit-msg'>")?;
        out.text(body)?;
        out.raw("</div>")?;
    }
    out.raw("\n")?;
    Ok(())
}
