use std::{collections::BTreeMap, fs, path::Path};

use tempfile::TempDir;

use super::{collect_prefixes, render_mapping_ts, run};
use crate::config::PrefixMappingConfig;

fn write(root: &Path, rel: &str, content: &str) {
    let full = root.join(rel);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

#[test]
fn prefixes_are_keyed_by_id_or_stem() {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path();
    write(
        root,
        "attributes/1002.mdx",
        "---\nid: variant\ncustomProps:\n  sidebar_prefix: 'x '\n---\n",
    );
    write(root, "attributes/1003.mdx", "---\ncustomProps:\n  sidebar_prefix: 'y '\n---\n");
    write(root, "attributes/1001.mdx", "---\nid: top\n---\n");
    write(root, "attributes/1004.md", "---\ncustomProps:\n  sidebar_prefix: 'z '\n---\n");
    write(root, "attributes/broken.mdx", "---\nid: [unclosed\n---\n");

    let mapping = collect_prefixes(root).unwrap();
    let expected: BTreeMap<String, String> = [("1003", "y "), ("variant", "x ")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(mapping, expected);
}

#[test]
fn typescript_module_layout() {
    let mapping: BTreeMap<String, String> =
        [("a".to_string(), "└─ ".to_string())].into_iter().collect();
    let ts = render_mapping_ts(&mapping, "2024-01-01T00:00:00Z").unwrap();
    assert_eq!(
        ts,
        "// Auto-generated mapping of document IDs to sidebar prefixes\n\
         // Generated on 2024-01-01T00:00:00Z\n\
         \n\
         export const sidebarPrefixMapping: Record<string, string> = {\n  \"a\": \"└─ \"\n};\n\
         \n\
         export default sidebarPrefixMapping;\n"
    );
}

#[test]
fn run_writes_output_file() {
    let tmp = TempDir::new().expect("tempdir");
    write(
        tmp.path(),
        "docs/a.mdx",
        "---\ncustomProps:\n  sidebar_prefix: 'p '\n---\n",
    );
    let config = PrefixMappingConfig {
        docs_root: tmp.path().join("docs"),
        output: tmp.path().join("src/utils/sidebarPrefixMapping.ts"),
    };

    assert_eq!(run(&config).unwrap(), 1);
    let written = fs::read_to_string(&config.output).unwrap();
    assert!(written.contains("\"a\": \"p \""));
}

#[test]
fn missing_docs_root_is_an_error() {
    let tmp = TempDir::new().expect("tempdir");
    assert!(collect_prefixes(&tmp.path().join("absent")).is_err());
}
