#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use reqwest::Url;
use serde::Serialize;

use crate::{
    constants::{GITHUB_HOST, INDEX_FILE, PAGES_DOMAIN_SUFFIX, RAW_CONTENT_HOST},
    error::ValidationError,
};

/// What a student typed in, classified by its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A bare GitHub username, e.g. `alice`.
    Account {
        /// The GitHub account.
        account: String,
    },
    /// A GitHub Pages address, e.g. `frank.github.io/proj`.
    Pages {
        /// Account owning the site.
        account:   String,
        /// Project repository named by the first path segment, if any.
        project:   Option<String>,
        /// Path segments after the host.
        segments:  Vec<String>,
        /// Whether the path ended in `/`.
        directory: bool,
    },
    /// A repository page on github.com, e.g. `github.com/alice/site`.
    Repository {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo:  String,
    },
    /// A file or directory view on github.com, e.g.
    /// `github.com/alice/site/blob/main/index.html`.
    Blob {
        /// Raw location the view corresponds to.
        file: RawFile,
    },
    /// An address already on raw.githubusercontent.com.
    Raw(Url),
    /// Any other http(s) address; fetched as given.
    Other(Url),
}

/// A file in a repository on a specific branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawFile {
    /// Repository owner.
    pub owner:  String,
    /// Repository name.
    pub repo:   String,
    /// Branch name.
    pub branch: String,
    /// Path of the file inside the repository, without a leading `/`.
    pub path:   String,
}

impl RawFile {
    /// Creates a raw file location.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            owner:  owner.into(),
            repo:   repo.into(),
            branch: branch.into(),
            path:   path.into(),
        }
    }

    /// Address of this file under a raw-content base such as
    /// `https://raw.githubusercontent.com`.
    pub fn url(&self, raw_base: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            raw_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.branch,
            self.path
        )
    }
}

impl fmt::Display for RawFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}:{}", self.owner, self.repo, self.branch, self.path)
    }
}

/// One address that might host the student's HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Fully qualified URL to request.
    url:   String,
    /// Short human-readable description of the location.
    label: String,
}

impl Candidate {
    /// Candidate for a repository file under `raw_base`.
    pub fn raw(file: &RawFile, raw_base: &str) -> Self {
        Self {
            url:   file.url(raw_base),
            label: file.to_string(),
        }
    }

    /// Candidate fetched exactly as given.
    pub fn direct(url: &Url) -> Self {
        Self {
            url:   url.to_string(),
            label: "as given".to_string(),
        }
    }

    /// Returns the URL to request.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the label describing this candidate.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Name of the repository that holds an account's user site.
pub fn pages_repo(account: &str) -> String {
    format!("{account}{PAGES_DOMAIN_SUFFIX}")
}

/// Whether a path segment names an HTML page rather than a directory.
fn is_page(segment: &str) -> bool {
    let lower = segment.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm")
}

/// Resolves path segments to the file a static host would serve for them.
fn served_file(segments: &[String], directory: bool) -> String {
    match segments.last() {
        None => INDEX_FILE.to_string(),
        Some(last) if !directory && is_page(last) => segments.join("/"),
        Some(_) => format!("{}/{INDEX_FILE}", segments.join("/")),
    }
}

/// Checks that `account` could be a GitHub username.
fn validate_account(input: &str, account: &str) -> Result<(), ValidationError> {
    if account.is_empty() {
        return Err(malformed(input, "the GitHub username is empty"));
    }
    if let Some(c) = account
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(malformed(input, format!("usernames cannot contain `{c}`")));
    }
    Ok(())
}

/// Shorthand for a `MalformedTarget` error.
fn malformed(input: &str, problem: impl Into<String>) -> ValidationError {
    ValidationError::MalformedTarget {
        input:   input.to_string(),
        problem: problem.into(),
    }
}

/// Whether the input names a host GitHub serves student work from.
fn has_domain_marker(lower: &str) -> bool {
    lower.contains(PAGES_DOMAIN_SUFFIX)
        || lower.contains(GITHUB_HOST)
        || lower.contains(RAW_CONTENT_HOST)
}

impl Target {
    /// Classifies raw user input.
    ///
    /// Input without a scheme, a `/` or a GitHub domain is a bare username.
    /// Everything else is parsed as a URL, with `https://` assumed when no
    /// scheme is given.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::MissingTarget);
        }

        let lower = input.to_ascii_lowercase();
        let has_scheme = lower.starts_with("http://") || lower.starts_with("https://");

        if !has_scheme && !input.contains('/') && !has_domain_marker(&lower) {
            validate_account(input, input)?;
            return Ok(Target::Account {
                account: input.to_string(),
            });
        }

        let url = if has_scheme {
            Url::parse(input)
        } else {
            Url::parse(&format!("https://{input}"))
        }
        .map_err(|e| malformed(input, e.to_string()))?;

        let host = url
            .host_str()
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| malformed(input, "the URL has no host"))?;
        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let directory = url.path().ends_with('/');

        if host == RAW_CONTENT_HOST {
            return Ok(Target::Raw(url));
        }

        if host == GITHUB_HOST || host == format!("www.{GITHUB_HOST}") {
            return Self::from_github_path(input, &segments, directory);
        }

        if let Some(account) = host.strip_suffix(PAGES_DOMAIN_SUFFIX) {
            if account.contains('.') {
                return Err(malformed(input, "expected <username>.github.io"));
            }
            validate_account(input, account)?;
            let project = segments.first().filter(|s| !is_page(s)).cloned();
            return Ok(Target::Pages {
                account: account.to_string(),
                project,
                segments,
                directory,
            });
        }

        if has_scheme {
            return Ok(Target::Other(url));
        }

        Err(malformed(
            input,
            "expected a GitHub username, a <username>.github.io address or a GitHub URL",
        ))
    }

    /// Classifies a github.com path.
    fn from_github_path(
        input: &str,
        segments: &[String],
        directory: bool,
    ) -> Result<Self, ValidationError> {
        match segments {
            [] => Err(malformed(input, "the GitHub URL does not name an account")),
            [owner] => {
                validate_account(input, owner)?;
                Ok(Target::Account {
                    account: owner.clone(),
                })
            }
            [owner, repo] => {
                validate_account(input, owner)?;
                Ok(Target::Repository {
                    owner: owner.clone(),
                    repo:  repo.clone(),
                })
            }
            [owner, repo, view, branch, rest @ ..] if view == "blob" || view == "tree" => {
                validate_account(input, owner)?;
                if view == "blob" && rest.is_empty() {
                    return Err(malformed(input, "the GitHub URL does not name a file"));
                }
                let path = if view == "tree" {
                    served_file(rest, true)
                } else {
                    served_file(rest, directory)
                };
                Ok(Target::Blob {
                    file: RawFile::new(owner.as_str(), repo.as_str(), branch.as_str(), path),
                })
            }
            _ => Err(malformed(
                input,
                "expected github.com/<owner>/<repo> or a link to a file on GitHub",
            )),
        }
    }

    /// Builds the ordered candidate list for this target.
    ///
    /// `branches` lists the conventional default branches in preference order.
    pub fn candidates(&self, raw_base: &str, branches: &[String]) -> Vec<Candidate> {
        match self {
            Target::Account { account } => branches
                .iter()
                .take(1)
                .map(|branch| {
                    RawFile::new(account.as_str(), pages_repo(account), branch.as_str(), INDEX_FILE)
                })
                .map(|file| Candidate::raw(&file, raw_base))
                .collect(),
            Target::Pages {
                account,
                project,
                segments,
                directory,
            } => {
                let project_files = project.iter().flat_map(|project| {
                    let path = served_file(&segments[1..], *directory);
                    branches.iter().map(move |branch| {
                        RawFile::new(
                            account.as_str(),
                            project.as_str(),
                            branch.as_str(),
                            path.clone(),
                        )
                    })
                });
                let site_file = |path: String| {
                    branches.iter().map(move |branch| {
                        RawFile::new(
                            account.as_str(),
                            pages_repo(account),
                            branch.as_str(),
                            path.clone(),
                        )
                    })
                };
                let site_files = if project.is_some() {
                    site_file(INDEX_FILE.to_string())
                } else {
                    site_file(served_file(segments, *directory))
                };
                // A project path may also be a folder inside the user site.
                let site_folder_files = project
                    .iter()
                    .flat_map(|_| site_file(served_file(segments, *directory)));

                project_files
                    .chain(site_files)
                    .chain(site_folder_files)
                    .map(|file| Candidate::raw(&file, raw_base))
                    .collect()
            }
            Target::Repository { owner, repo } => branches
                .iter()
                .map(|branch| {
                    RawFile::new(owner.as_str(), repo.as_str(), branch.as_str(), INDEX_FILE)
                })
                .map(|file| Candidate::raw(&file, raw_base))
                .collect(),
            Target::Blob { file } => vec![Candidate::raw(file, raw_base)],
            Target::Raw(url) | Target::Other(url) => vec![Candidate::direct(url)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "https://raw.githubusercontent.com";

    fn branches() -> Vec<String> {
        vec!["main".to_string(), "master".to_string()]
    }

    fn urls(target: &Target) -> Vec<String> {
        target
            .candidates(RAW, &branches())
            .iter()
            .map(|c| c.url().to_string())
            .collect()
    }

    #[test]
    fn bare_username_yields_single_default_candidate() {
        let target = Target::parse("  alice ").unwrap();
        assert_eq!(
            target,
            Target::Account {
                account: "alice".into(),
            }
        );
        assert_eq!(
            urls(&target),
            vec!["https://raw.githubusercontent.com/alice/alice.github.io/main/index.html"]
        );
    }

    #[test]
    fn pages_subpath_is_tried_before_user_site() {
        let target = Target::parse("frank.github.io/proj").unwrap();
        assert_eq!(
            urls(&target),
            vec![
                "https://raw.githubusercontent.com/frank/proj/main/index.html",
                "https://raw.githubusercontent.com/frank/proj/master/index.html",
                "https://raw.githubusercontent.com/frank/frank.github.io/main/index.html",
                "https://raw.githubusercontent.com/frank/frank.github.io/master/index.html",
                "https://raw.githubusercontent.com/frank/frank.github.io/main/proj/index.html",
                "https://raw.githubusercontent.com/frank/frank.github.io/master/proj/index.html",
            ]
        );
    }

    #[test]
    fn pages_root_only_tries_user_site() {
        let target = Target::parse("https://Frank.GitHub.io/").unwrap();
        assert_eq!(
            urls(&target),
            vec![
                "https://raw.githubusercontent.com/frank/frank.github.io/main/index.html",
                "https://raw.githubusercontent.com/frank/frank.github.io/master/index.html",
            ]
        );
    }

    #[test]
    fn pages_html_file_is_not_a_project() {
        let target = Target::parse("https://bea.github.io/about.html").unwrap();
        assert_eq!(
            urls(&target),
            vec![
                "https://raw.githubusercontent.com/bea/bea.github.io/main/about.html",
                "https://raw.githubusercontent.com/bea/bea.github.io/master/about.html",
            ]
        );
    }

    #[test]
    fn pages_project_file_keeps_its_path() {
        let target = Target::parse("https://bea.github.io/proj/docs/page.html").unwrap();
        let urls = urls(&target);
        assert_eq!(urls[0], "https://raw.githubusercontent.com/bea/proj/main/docs/page.html");
        assert_eq!(urls[2], "https://raw.githubusercontent.com/bea/bea.github.io/main/index.html");
        assert_eq!(
            urls[4],
            "https://raw.githubusercontent.com/bea/bea.github.io/main/proj/docs/page.html"
        );
    }

    #[test]
    fn blob_link_is_rebuilt_from_components() {
        let target =
            Target::parse("https://github.com/carol/site/blob/dev/pages/index.html").unwrap();
        assert_eq!(
            urls(&target),
            vec!["https://raw.githubusercontent.com/carol/site/dev/pages/index.html"]
        );
    }

    #[test]
    fn blob_rewrite_ignores_github_com_elsewhere_in_path() {
        let target =
            Target::parse("https://github.com/carol/github.com/blob/main/index.html").unwrap();
        assert_eq!(
            urls(&target),
            vec!["https://raw.githubusercontent.com/carol/github.com/main/index.html"]
        );
    }

    #[test]
    fn tree_link_points_at_directory_index() {
        let target = Target::parse("github.com/carol/site/tree/main/week2").unwrap();
        assert_eq!(
            urls(&target),
            vec!["https://raw.githubusercontent.com/carol/site/main/week2/index.html"]
        );
    }

    #[test]
    fn repository_link_tries_both_branches() {
        let target = Target::parse("https://github.com/dan/portfolio").unwrap();
        assert_eq!(
            urls(&target),
            vec![
                "https://raw.githubusercontent.com/dan/portfolio/main/index.html",
                "https://raw.githubusercontent.com/dan/portfolio/master/index.html",
            ]
        );
    }

    #[test]
    fn github_profile_link_is_an_account() {
        let target = Target::parse("https://github.com/erin").unwrap();
        assert_eq!(
            target,
            Target::Account {
                account: "erin".into(),
            }
        );
    }

    #[test]
    fn raw_address_is_used_verbatim() {
        let raw = "https://raw.githubusercontent.com/gus/gus.github.io/main/index.html";
        let target = Target::parse(raw).unwrap();
        assert!(matches!(target, Target::Raw(_)));
        assert_eq!(urls(&target), vec![raw]);
    }

    #[test]
    fn unknown_host_with_scheme_is_fetched_as_given() {
        let target = Target::parse("http://localhost:8080/site/index.html").unwrap();
        assert!(matches!(target, Target::Other(_)));
        assert_eq!(urls(&target), vec!["http://localhost:8080/site/index.html"]);
    }

    #[test]
    fn blank_and_malformed_inputs_are_rejected() {
        assert_eq!(Target::parse("   "), Err(ValidationError::MissingTarget));
        assert!(matches!(
            Target::parse("al ice"),
            Err(ValidationError::MalformedTarget { .. })
        ));
        assert!(matches!(
            Target::parse("example.com"),
            Err(ValidationError::MalformedTarget { .. })
        ));
        assert!(matches!(
            Target::parse("alice/repo"),
            Err(ValidationError::MalformedTarget { .. })
        ));
        assert!(matches!(
            Target::parse("https://github.com/"),
            Err(ValidationError::MalformedTarget { .. })
        ));
    }
}
