//! Server-rendered HTML
//!
//! Pages are plain `format!` templates. Every interpolated value passes
//! through [`text`] or [`attr`] first.

pub mod substations;

use web::Flash;

/// Escape for element content
pub fn text(value: &str) -> String {
    htmlescape::encode_minimal(value)
}

/// Escape for a double-quoted attribute value
pub fn attr(value: &str) -> String {
    htmlescape::encode_attribute(value)
}

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;}\
table{border-collapse:collapse;width:100%;}\
th,td{border:1px solid #ccc;padding:.4rem;text-align:left;}\
.flash{padding:.6rem;margin-bottom:1rem;border-radius:4px;}\
.flash-success{background:#d4edda;}\
.flash-danger{background:#f8d7da;}\
.field-error{color:#a00;font-size:.9em;}\
form.inline{display:inline;}";

/// Wrap `body` in the shared page chrome
pub fn layout(app_name: &str, title: &str, flash: Option<&Flash>, body: &str) -> String {
    let banner = flash
        .map(|f| {
            format!(
                "<div class=\"flash flash-{}\">{}</div>",
                f.level.as_str(),
                text(&f.message)
            )
        })
        .unwrap_or_default();

    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | {app}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <h1><a href=\"/\">{app}</a></h1>\n{banner}\n{body}\n</body>\n</html>\n",
        title = text(title),
        app = text(app_name),
        style = STYLE,
        banner = banner,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_escapes_flash_and_title() {
        let page = layout(
            "Registry",
            "<List>",
            Some(&Flash::danger("<b>bad</b>")),
            "<p>body</p>",
        );

        assert!(page.contains("&lt;List&gt; | Registry"));
        assert!(page.contains("flash-danger\">&lt;b&gt;bad&lt;/b&gt;"));
        assert!(page.contains("<p>body</p>"));
    }
}
