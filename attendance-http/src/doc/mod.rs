use crate::{
    server::*,
    wrappers::{Confirmation, SubjectData},
};
use utoipa::OpenApi;
/// Attendance HTTP
///
/// This API keeps an attendance register of subjects over the HTTP protocol.
/// It allows creating subjects, marking them present or absent and deleting
/// them. The API is documented with OpenAPI for easy integration and use.
///
/// # Configuration
///
/// This client uses a single configuration variable, which is set through an
/// environment variable. Ensure that the environment variable is properly
/// configured before using this API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance HTTP",
        description = "This API keeps an attendance register of subjects over the HTTP protocol. It allows creating subjects, marking them present or absent and deleting them. The API is documented with OpenAPI for easy integration and use.",
        version = "0.1.0",
        contact(
            name = "Kore Information",
            url = "https://www.kore-ledger.net/",
            email = "info@kore-ledger.net"
        ),
        license(
            name = "AGPL-3.0-only",
            url = "https://www.gnu.org/licenses/agpl-3.0.html"
        )
    ),
    paths(
        get_subjects,
        create_subject,
        mark_present,
        mark_absent,
        delete_subject
    ),
    components(
        schemas(
            CreateSubjectRequest,
            SubjectData,
            Confirmation
        )
    ),
    tags(
        (name = "Subject", description = "Endpoints for managing subjects and their data."),
        (name = "Attendance", description = "Endpoints related to attendance marking."),
    )
)]
pub struct ApiDoc;
