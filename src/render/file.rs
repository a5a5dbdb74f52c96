use std::borrow::Cow;
use std::path::Path;

use tera::{Context, Tera};

/// Extensions copied verbatim without being parsed as templates.
pub const DEFAULT_OPAQUE_EXTENSIONS: &[&str] = &[
    "ico", "png", "jpg", "jpeg", "gif", "bmp", "webp", "svgz", "woff", "woff2", "ttf", "eot",
    "otf", "mp3", "mp4", "zip", "gz", "pdf",
];

/// Wrap every `{%` and `{#` in a raw block so they pass through as literal text.
///
/// Only `{{ key }}` placeholders are interpreted; statement and comment syntax in
/// shell scripts, docs or other template languages is left alone.
fn escape_tag_openers(content: &str) -> Cow<'_, str> {
    if !content.contains("{%") && !content.contains("{#") {
        return Cow::Borrowed(content);
    }
    // `{%` first: the `{#` replacement contains a `{%` of its own
    let escaped = content.replace("{%", "{% raw %}{%{% endraw %}");
    Cow::Owned(escaped.replace("{#", "{% raw %}{#{% endraw %}"))
}

/// Render one template file. Autoescaping is off so `.html` sources are not HTML-escaped.
pub fn render_file_content(
    template_name: &str,
    content: &str,
    context: &Context,
) -> std::result::Result<String, tera::Error> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(template_name, &escape_tag_openers(content))?;
    tera.render(template_name, context)
}

/// Whether a file is copied byte-for-byte: its extension is listed, or its content looks binary.
pub fn is_opaque(path: &Path, content: &[u8], opaque_extensions: &[String]) -> bool {
    has_opaque_extension(path, opaque_extensions) || is_binary_content(content)
}

pub fn has_opaque_extension(path: &Path, opaque_extensions: &[String]) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };
    let ext = ext.to_string_lossy();
    opaque_extensions
        .iter()
        .any(|o| o.trim_start_matches('.').eq_ignore_ascii_case(&ext))
}

/// Detect binary content using content_inspector (BOM-aware, null-byte scanning).
///
/// Only the first 8KB are inspected.
pub fn is_binary_content(content: &[u8]) -> bool {
    let n = content.len().min(8192);
    !content_inspector::inspect(&content[..n]).is_text()
}
