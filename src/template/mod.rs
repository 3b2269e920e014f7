//! Templating code.
//!
//! This defines the [`Page`] item, the shell every server-rendered page is
//! wrapped in.

use hypertext::prelude::*;

const STYLE: &str = "
body { font-family: sans-serif; margin: 0; background: #0f172a; color: #e2e8f0; }
nav { background-color: #452859; padding: 0.75rem 1.5rem; }
nav a { color: white; text-decoration: none; font-weight: bold; }
main { max-width: 64rem; margin: 0 auto; padding: 2rem 1rem; }
table { width: 100%; border-collapse: collapse; margin-bottom: 2rem; }
th, td { padding: 0.5rem 0.75rem; border-bottom: 1px solid #334155; text-align: left; }
td.num { text-align: right; }
";

pub struct Page<R: Renderable> {
    title: String,
    body: Option<R>,
    live: bool,
}

impl<R: Renderable> Page<R> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: None,
            live: false,
        }
    }

    pub fn body(mut self, body: R) -> Self {
        self.body = Some(body);
        self
    }

    /// Reloads the page whenever the GC channel pushes a new table.
    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }
}

impl<R: Renderable> Renderable for Page<R> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud!({
            html {
                head {
                    title { (self.title) }
                    meta
                        name="viewport"
                        content="width=device-width, initial-scale=1";
                    style { (STYLE) }
                }
                body {
                    nav {
                        a href="/gc" { "General Championship" }
                    }
                    main {
                        @if let Some(body) = &self.body {
                            (body)
                        }
                    }
                    @if self.live {
                        script src="/gc/live.js" {}
                    }
                }
            }
        })
        .render_to(buffer);
    }
}
