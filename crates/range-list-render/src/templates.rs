//! Embedded template environment.
//!
//! Templates are compiled into the binary; `.html` templates are
//! auto-escaped, so labels and tokens can be passed in raw.

use std::sync::LazyLock;

use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, Error};

static TEMPLATE_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Facet markup, one `<div>` per range.
pub const RANGE_LIST_TEMPLATE: &str = "range_list.html";

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();

    env.set_auto_escape_callback(|name| {
        let is_html = std::path::Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if is_html {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });

    for file in TEMPLATE_DIR.files() {
        let Some(name) = file.path().to_str() else {
            continue;
        };
        let contents =
            std::str::from_utf8(file.contents()).unwrap_or("<!-- invalid utf-8 template -->");
        if let Err(err) = env.add_template(name, contents) {
            tracing::error!(template = name, error = %err, "failed to load embedded template");
        }
    }

    env
});

/// Render an embedded template by name.
pub fn render_template<T: serde::Serialize>(name: &str, ctx: T) -> Result<String, Error> {
    let tpl = ENV.get_template(name)?;
    tpl.render(ctx)
}
