use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub full_name: String,
    pub name: String,
    pub owner_login: String,
    pub private: bool,

    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub description: Option<String>,

    pub updated_at: String,
}

impl Repository {
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef {
            owner: self.owner_login.clone(),
            name: self.name.clone(),
        }
    }
}

/// An `owner/name` pair identifying a remote repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((owner, name)) = s.trim().split_once('/') else {
            anyhow::bail!("expected <owner>/<repo>, got {:?}", s);
        };
        let dotted = |s: &str| s == "." || s == "..";
        if owner.is_empty() || name.is_empty() || name.contains('/') || dotted(owner) || dotted(name) {
            anyhow::bail!("expected <owner>/<repo>, got {:?}", s);
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct CreateRepoOptions {
    pub name: String,
    pub description: Option<String>,
    pub private: bool,
    pub initialize_with_readme: bool,
    pub gitignore_template: Option<String>,
    pub license_template: Option<String>,
}

impl CreateRepoOptions {
    /// Templates are seeded by an initial commit, so either one implies README initialization.
    pub fn auto_init(&self) -> bool {
        self.initialize_with_readme
            || self.gitignore_template.is_some()
            || self.license_template.is_some()
    }
}
