use std::fmt::Write as _;

use annotate_snippets::{Level, Renderer, Snippet};
use logtrail_ide::{Buffer, Preview};

/// Renders every preview as an annotated snippet of `text`.
pub(crate) fn render(renderer: &Renderer, path: &str, text: &str, previews: &[Preview]) -> String {
    let buffer = Buffer::new(text);
    let mut out = String::new();

    for preview in previews {
        let title = format!("insert `{}`", preview.statement);
        let note = format!(
            "goes below line {} with {} spaces of indentation",
            buffer.line_of(preview.trail.anchor) + 1,
            preview.trail.indent,
        );

        let message = Level::Info
            .title(&title)
            .snippet(
                Snippet::source(text)
                    .origin(path)
                    .annotation(Level::Info.span(preview.identifier.into()).label(&preview.trail.label))
                    .fold(true),
            )
            .footer(Level::Note.title(&note));

        let _ = writeln!(out, "{}\n", renderer.render(message));
    }

    out
}

#[cfg(test)]
mod tests {
    use annotate_snippets::Renderer;
    use logtrail_ide::{Analysis, Caret};
    use logtrail_inputs::File;

    use super::render;

    fn preview(text: &str, carets: &[u32]) -> String {
        let analysis = Analysis::default();
        let file = File::from_path(analysis.db(), "app.js".into(), text.to_owned());
        let carets = carets.iter().map(|&offset| Caret::at(offset.into())).collect::<Vec<_>>();

        let previews = analysis.preview(file, &carets);
        render(&Renderer::plain(), "app.js", text, &previews)
    }

    #[test]
    fn annotates_the_identifier() {
        let rendered = preview("function f() {\n    let y = 1;\n}\n", &[23]);

        assert!(rendered.contains("insert `console.log('f -> y', y);`"), "{rendered}");
        assert!(rendered.contains("app.js"), "{rendered}");
        assert!(rendered.contains("let y = 1;"), "{rendered}");
        assert!(rendered.contains("goes below line 2 with 4 spaces of indentation"), "{rendered}");
    }

    #[test]
    fn one_snippet_per_caret() {
        let rendered = preview("const a = 1;\nconst b = a;\n", &[6, 19, 8]);

        assert_eq!(rendered.matches("insert `").count(), 2, "{rendered}");
        assert!(rendered.contains("insert `console.log('a', a);`"), "{rendered}");
        assert!(rendered.contains("insert `console.log('b', b);`"), "{rendered}");
    }

    #[test]
    fn nothing_to_preview() {
        assert_eq!(preview("let a;\n", &[3]), "");
    }
}
