use std::{collections::BTreeMap, path::PathBuf};

pub const DEFAULT_SOURCE_HTML_ROOT: &str = "ISBDM/docs/";
pub const DEFAULT_TARGET_MDX_ROOT: &str = "docs/";
pub const DEFAULT_LOG_FILE: &str = "navmatter.log";

// Environment variable that overrides `--log-level`.
pub const LOG_ENV_VAR: &str = "NAVMATTER_LOG";

/// Legacy absolute URL prefix used by hrefs in the HTML navigation.
pub const LEGACY_URL_PREFIX: &str = "/ISBDM/docs/";

pub const NAV_CONTAINER_SELECTOR: &str = "nav.navISBDMSection";
pub const NAV_ROW_CLASS: &str = "d-flex";
pub const NAV_INDENT_SELECTOR: &str = "i.bi-arrow-return-right";

pub const SES_SOURCE_DIR: &str = "ves";
pub const SES_INDEX_FILENAME: &str = "ISBDMSES.html";
pub const SES_SECTION_KEY: &str = "ses";

pub const RELATIONSHIPS_DIR: &str = "relationships";
pub const RELATIONSHIP_CATEGORY_FILES: &[&str] =
    &["agents", "nomens", "resources", "placetimes", "general", "index"];
// Category files whose entries carry no category tag.
pub const UNCATEGORISED_RELATIONSHIP_FILES: &[&str] = &["index", "general"];

/// Class given to entries at the top of their own navigation block.
pub const CLASS_LOCAL_LEVEL_1_ITEM: &str = "menu-item-html-level-1";

pub const SIDEBAR_LEVEL_CLASS_PREFIX: &str = "sidebar-level-";
pub const NORMALIZE_DOCS_DIR: &str = "docs";

pub const PREFIX_MAPPING_OUTPUT: &str = "src/utils/sidebarPrefixMapping.ts";

/// Where the legacy navigation lives and how its sections map onto document keys.
#[derive(Clone, Debug)]
pub struct SourceLayout {
    pub legacy_url_prefix: String,
    pub container_selector: String,
    pub row_class: String,
    pub indent_selector: String,
    pub ses_source_dir: String,
    pub ses_index_filename: String,
    pub ses_section_key: String,
    pub relationships_dir: String,
    pub relationship_category_files: Vec<String>,
    pub uncategorised_relationship_files: Vec<String>,
    pub level_1_class: String,
    pub document_extensions: Vec<String>,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            legacy_url_prefix: LEGACY_URL_PREFIX.to_string(),
            container_selector: NAV_CONTAINER_SELECTOR.to_string(),
            row_class: NAV_ROW_CLASS.to_string(),
            indent_selector: NAV_INDENT_SELECTOR.to_string(),
            ses_source_dir: SES_SOURCE_DIR.to_string(),
            ses_index_filename: SES_INDEX_FILENAME.to_string(),
            ses_section_key: SES_SECTION_KEY.to_string(),
            relationships_dir: RELATIONSHIPS_DIR.to_string(),
            relationship_category_files: to_owned_vec(RELATIONSHIP_CATEGORY_FILES),
            uncategorised_relationship_files: to_owned_vec(UNCATEGORISED_RELATIONSHIP_FILES),
            level_1_class: CLASS_LOCAL_LEVEL_1_ITEM.to_string(),
            document_extensions: vec!["mdx".to_string()],
        }
    }
}

impl SourceLayout {
    /// Category tag carried by entries parsed from a relationship category file.
    pub fn relationship_category(&self, file_base: &str) -> Option<String> {
        if self
            .uncategorised_relationship_files
            .iter()
            .any(|f| f == file_base)
        {
            None
        } else {
            Some(file_base.to_string())
        }
    }
}

/// Settings for the follow-up front-matter normalization pass.
#[derive(Clone, Debug)]
pub struct NormalizeConfig {
    pub docs_root: PathBuf,
    pub slug_subdir: String,
    pub level_class_prefixes: BTreeMap<i64, String>,
    pub document_extensions: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        let level_class_prefixes = (1..=3)
            .map(|level| (level, SIDEBAR_LEVEL_CLASS_PREFIX.to_string()))
            .collect();
        Self {
            docs_root: PathBuf::from(NORMALIZE_DOCS_DIR),
            slug_subdir: RELATIONSHIPS_DIR.to_string(),
            level_class_prefixes,
            document_extensions: vec!["md".to_string(), "mdx".to_string()],
        }
    }
}

/// Settings for exporting sidebar prefixes to the site's TypeScript sources.
#[derive(Clone, Debug)]
pub struct PrefixMappingConfig {
    pub docs_root: PathBuf,
    pub output: PathBuf,
}

impl Default for PrefixMappingConfig {
    fn default() -> Self {
        Self {
            docs_root: PathBuf::from(NORMALIZE_DOCS_DIR),
            output: PathBuf::from(PREFIX_MAPPING_OUTPUT),
        }
    }
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
