use serde::Deserialize;

/// Row of the `academies` table
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Academy {
    pub id: String,

    pub name: String,

    /// Consultation availability, as a schedule string
    #[serde(default)]
    pub schedule: Option<String>,
}

/// Row of the `classes` table
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Class {
    pub id: String,

    pub academy_id: String,

    /// Class' name
    pub name: String,

    /// Weekly schedule string, i.e.: `월/수/금 18:00~22:00`
    #[serde(default)]
    pub schedule: Option<String>,

    /// Teacher's name
    #[serde(default)]
    pub teacher: Option<String>,
}

/// Error body returned by the REST API
#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
}
