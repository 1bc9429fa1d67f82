use crate::config::{AttrValue, Attributes, PartialTemplateConfig, ScriptTag, TemplateConfig};
use crate::validate::validate;
use pagebuilder_blocks::escape_html;
use tracing::{debug, warn};

/// Options for document assembly
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Put each head entry on its own indented line
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "    ".to_string(),
        }
    }
}

struct Context {
    options: AssembleOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: AssembleOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    /// Add a multi-line fragment, reindenting every non-empty line.
    ///
    /// Compact output still keeps one newline between lines.
    fn add_lines(&mut self, fragment: &str) {
        let lines: Vec<&str> = fragment
            .trim()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if self.options.pretty {
            for line in lines {
                self.add_line(line);
            }
        } else {
            self.add(&lines.join("\n"));
        }
    }

    /// Add markup verbatim; only the first line is indented
    fn add_verbatim(&mut self, markup: &str) {
        if markup.is_empty() {
            return;
        }
        self.add_line(markup);
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Merge `config` over the defaults and wrap `body` into a full document
pub fn assemble(body: &str, config: &PartialTemplateConfig) -> String {
    assemble_with(body, &TemplateConfig::from_partial(config), AssembleOptions::default())
}

/// Wrap `body` into a full document using an already merged configuration.
///
/// Template problems are logged and never stop assembly.
pub fn assemble_with(body: &str, config: &TemplateConfig, options: AssembleOptions) -> String {
    if let Err(violation) = validate(config) {
        warn!(%violation, "Template configuration is invalid; assembling anyway");
    }

    let mut ctx = Context::new(options);

    ctx.add_line(config.doctype.trim());
    ctx.add_line(&format!("<html{}>", render_attributes(&config.html_attributes)));

    compile_head(config, &mut ctx);

    ctx.add_line(&format!("<body{}>", render_attributes(&config.body_attributes)));
    ctx.indent();
    ctx.add_verbatim(body);
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.add_line("</html>");

    let output = ctx.get_output();
    debug!(bytes = output.len(), "Assembled document");
    output
}

fn compile_head(config: &TemplateConfig, ctx: &mut Context) {
    let head = &config.head;

    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line(&format!("<title>{}</title>", escape_html(&head.title)));

    for meta in &head.meta {
        ctx.add_line(&format!("<meta{}>", render_attributes(meta)));
    }

    for link in &head.links {
        ctx.add_line(&format!("<link{}>", render_attributes(link)));
    }

    for script in &head.scripts {
        ctx.add_line(&render_script(script));
    }

    // Escape hatch: passed through unescaped
    ctx.add_lines(&head.custom_head);

    ctx.dedent();
    ctx.add_line("</head>");
}

fn render_script(script: &ScriptTag) -> String {
    let attrs = render_attributes(&script.attributes);
    match &script.content {
        Some(content) => format!("<script{attrs}>{content}</script>"),
        None => format!("<script{attrs}></script>"),
    }
}

/// Render attributes with a leading space each; values are escaped.
pub fn render_attributes(attrs: &Attributes) -> String {
    let mut out = String::new();

    for (name, value) in attrs {
        if !is_valid_attribute_name(name) {
            warn!(attribute = %name, "Skipping attribute with invalid name");
            continue;
        }
        match value {
            AttrValue::Flag(true) => {
                out.push(' ');
                out.push_str(name);
            }
            AttrValue::Flag(false) => {}
            AttrValue::Number(n) => out.push_str(&format!(" {name}=\"{n}\"")),
            AttrValue::Text(text) => out.push_str(&format!(" {name}=\"{}\"", escape_html(text))),
        }
    }

    out
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '<' | '/' | '='))
}
