use docsplice_blocks::{Dialect, DocumentationSplicer, GenerationError, GenerationRequest};
use docsplice_python::{PythonParser, extract};
use pretty_assertions::assert_eq;

const SOURCE: &str = r#""""Inventory helpers."""
import json


class Inventory:
    """Holds items."""

    def __init__(self):
        self.items = {}

    @property
    def size(self):
        """
        Number of items.
        """
        return len(self.items)


async def load(path):
    with open(path) as f:
        return json.load(f)
"#;

const STRIPPED: &str = r#"import json


class Inventory:

    def __init__(self):
        self.items = {}

    @property
    def size(self):
        return len(self.items)


async def load(path):
    with open(path) as f:
        return json.load(f)
"#;

fn summary(request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
    Ok(format!("Summary of {}.", request.name))
}

#[test]
fn strips_real_python_source() {
    let mut extraction = extract(SOURCE, "inventory.py", &Dialect::python()).unwrap();
    assert!(extraction.failures.is_empty());

    let report = DocumentationSplicer::default().remove_documentation(&mut extraction.unit);

    assert_eq!(report.removed_lines, 1 + 1 + 3);
    assert_eq!(extraction.unit.to_text(), STRIPPED);
}

#[test]
fn embedded_output_parses_with_every_block_documented() {
    let splicer = DocumentationSplicer::default();
    let mut extraction = extract(SOURCE, "inventory.py", &Dialect::python()).unwrap();
    splicer.remove_documentation(&mut extraction.unit);
    splicer.embed_documentation(&mut extraction.unit, &summary);

    let text = extraction.unit.to_text();
    let tree = PythonParser::new().parse(&text, "inventory.py").unwrap();

    assert_eq!(tree.module_documentation.as_deref(), Some("Summary of inventory.py."));
    for node in &tree.nodes {
        assert_eq!(
            node.documentation.as_deref(),
            Some(format!("Summary of {}.", node.name).as_str()),
            "{}",
            node.name
        );
    }
    assert!(text.contains("    @property\n    def size(self):\n        \"\"\"\n        Summary of size.\n"));
    assert!(text.ends_with("        return json.load(f)\n"));
}

#[test]
fn replace_keeps_positions_consistent_with_a_fresh_parse() {
    let splicer = DocumentationSplicer::default();
    let mut extraction = extract(SOURCE, "inventory.py", &Dialect::python()).unwrap();
    splicer.remove_documentation(&mut extraction.unit);
    splicer.embed_documentation(&mut extraction.unit, &summary);

    let text = extraction.unit.to_text();
    let fresh = extract(&text, "inventory.py", &Dialect::python()).unwrap();

    for block in fresh.unit.blocks() {
        let spliced = extraction.unit.block(block.name()).unwrap();
        assert_eq!(spliced.declaration_start(), block.declaration_start(), "{}", block.name());
        assert_eq!(spliced.position(), block.position(), "{}", block.name());
        assert_eq!(
            spliced.documentation().map(|d| d.position()),
            block.documentation().map(|d| d.position()),
            "{}",
            block.name()
        );
    }
}
