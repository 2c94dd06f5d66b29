use attendance_registry::Subject;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubjectData {
    pub id: String,
    pub name: String,
    pub attended: u64,
    pub absent: u64,
}

impl From<Subject> for SubjectData {
    fn from(value: Subject) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            attended: value.attended,
            absent: value.absent,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Confirmation {
    pub message: String,
}
