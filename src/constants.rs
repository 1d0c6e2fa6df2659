#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Bootstrap utility classes every submission is expected to use, in rubric
/// order.
pub const DEFAULT_REQUIRED_CLASSES: [&str; 16] = [
    "text-center",
    "text-primary",
    "fw-bold",
    "text-success",
    "text-danger",
    "text-warning",
    "text-info",
    "text-muted",
    "mb-4",
    "bg-primary",
    "text-white",
    "bg-success",
    "bg-danger",
    "bg-warning",
    "bg-dark",
    "text-light",
];

/// Conventional default branch names, tried in this order.
pub const DEFAULT_BRANCHES: [&str; 2] = ["main", "master"];

/// Base address GitHub serves raw repository content from.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Host of raw repository content.
pub const RAW_CONTENT_HOST: &str = "raw.githubusercontent.com";

/// Host of the GitHub web interface.
pub const GITHUB_HOST: &str = "github.com";

/// Domain suffix of GitHub Pages sites.
pub const PAGES_DOMAIN_SUFFIX: &str = ".github.io";

/// Page fetched when a target names a site or directory instead of a file.
pub const INDEX_FILE: &str = "index.html";

/// Per-attempt fetch timeout, in seconds.
pub const FETCH_TIMEOUT_SECS: u64 = 10;
