use crate::config::destination;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(pub String);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Path(pub String);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exclude(pub String);

#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Copy,
    Mirror,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Source {
    pub path: Path,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub excludes: Vec<Exclude>,
    #[serde(default, alias = "extra_args")]
    pub extra_args: Vec<String>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Definition {
    pub destination: destination::Name,
    #[serde(default, alias = "delete_extraneous")]
    pub delete_extraneous: bool,
    #[serde(default)]
    pub sources: Vec<Source>,
}
