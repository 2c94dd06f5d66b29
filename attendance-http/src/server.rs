use std::sync::Arc;

use crate::{
    enviroment::build_doc,
    error::Error,
    wrappers::{Confirmation, SubjectData},
};
use attendance_registry::Registry;
use axum::{
    Extension, Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;
use tower::ServiceBuilder;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSubjectRequest {
    name: Option<String>,
}

use crate::doc::ApiDoc;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// All Subjects
///
/// Allows obtaining the list of registered subjects with their attendance
/// counters, in insertion order.
///
/// # Parameters
///
/// * `Extension(registry): Extension<Arc<Registry>>` - The registry extension wrapped in an `Arc`.
///
/// # Returns
///
/// * `Result<Json<Vec<SubjectData>>, Error>` - A list of subjects in JSON format or an error if the request fails.
#[utoipa::path(
    get,
    path = "/subjects",
    operation_id = "All Subjects",
    tag = "Subject",
    responses(
        (status = 200, description = "Subjects Data successfully retrieved", body = [SubjectData],
        example = json!(
            [
                {
                    "id": "66f2f3a4b5c6d7e8f9a0b1c2",
                    "name": "Math",
                    "attended": 2,
                    "absent": 1
                }
            ]
        )),
        (status = 500, description = "Internal Server Error"),
    )
)]
async fn get_subjects(
    Extension(registry): Extension<Arc<Registry>>,
) -> Result<Json<Vec<SubjectData>>, Error> {
    match registry.get_subjects().await {
        Ok(response) => Ok(Json(
            response
                .iter()
                .map(|x| SubjectData::from(x.clone()))
                .collect(),
        )),
        Err(e) => Err(Error::from(e)),
    }
}

/// Create Subject
///
/// Registers a new subject with both attendance counters at zero.
/// The name is required and must not be blank.
///
/// # Parameters
///
/// * `Extension(registry): Extension<Arc<Registry>>` - The registry extension wrapped in an `Arc`.
/// * `Json(request): Json<CreateSubjectRequest>` - The subject to create in JSON format.
///
/// # Returns
///
/// * `Result<(StatusCode, Json<SubjectData>), Error>` - The created subject in JSON format or an error if the request fails.
#[utoipa::path(
    post,
    path = "/subjects",
    operation_id = "Create Subject",
    tag = "Subject",
    request_body(content = CreateSubjectRequest, content_type = "application/json", description = "The subject to create"),
    responses(
        (status = 201, description = "Subject Created Successfully", body = SubjectData,
        example = json!(
            {
                "id": "66f2f3a4b5c6d7e8f9a0b1c2",
                "name": "Math",
                "attended": 0,
                "absent": 0
            }
        )),
        (status = 400, description = "Bad Request"),
        (status = 500, description = "Internal Server Error"),
    )
)]
async fn create_subject(
    Extension(registry): Extension<Arc<Registry>>,
    Json(request): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectData>), Error> {
    match registry
        .create_subject(request.name.unwrap_or_default())
        .await
    {
        Ok(response) => {
            Ok((StatusCode::CREATED, Json(SubjectData::from(response))))
        }
        Err(e) => Err(Error::from(e)),
    }
}

/// Mark Present
///
/// Adds one attendance to a subject given its identifier.
///
/// # Parameters
///
/// * `Extension(registry): Extension<Arc<Registry>>` - The registry extension wrapped in an `Arc`.
/// * `Path(subject_id): Path<String>` - The identifier of the subject as a path parameter.
///
/// # Returns
///
/// * `Result<Json<Confirmation>, Error>` - A confirmation message in JSON format or an error if the request fails.
#[utoipa::path(
    post,
    path = "/subjects/{subject_id}/present",
    operation_id = "Mark Present",
    tag = "Attendance",
    params(
        ("subject_id" = String, Path, description = "Subjects unique id"),
    ),
    responses(
        (status = 200, description = "Attendance counter incremented", body = Confirmation,
        example = json!(
            {
                "message": "Marked as present"
            }
        )),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal Server Error"),
    )
)]
async fn mark_present(
    Extension(registry): Extension<Arc<Registry>>,
    Path(subject_id): Path<String>,
) -> Result<Json<Confirmation>, Error> {
    match registry.mark_present(subject_id).await {
        Ok(()) => Ok(Json(Confirmation {
            message: "Marked as present".to_owned(),
        })),
        Err(e) => Err(Error::from(e)),
    }
}

/// Mark Absent
///
/// Adds one absence to a subject given its identifier.
///
/// # Parameters
///
/// * `Extension(registry): Extension<Arc<Registry>>` - The registry extension wrapped in an `Arc`.
/// * `Path(subject_id): Path<String>` - The identifier of the subject as a path parameter.
///
/// # Returns
///
/// * `Result<Json<Confirmation>, Error>` - A confirmation message in JSON format or an error if the request fails.
#[utoipa::path(
    post,
    path = "/subjects/{subject_id}/absent",
    operation_id = "Mark Absent",
    tag = "Attendance",
    params(
        ("subject_id" = String, Path, description = "Subjects unique id"),
    ),
    responses(
        (status = 200, description = "Absence counter incremented", body = Confirmation,
        example = json!(
            {
                "message": "Marked as absent"
            }
        )),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal Server Error"),
    )
)]
async fn mark_absent(
    Extension(registry): Extension<Arc<Registry>>,
    Path(subject_id): Path<String>,
) -> Result<Json<Confirmation>, Error> {
    match registry.mark_absent(subject_id).await {
        Ok(()) => Ok(Json(Confirmation {
            message: "Marked as absent".to_owned(),
        })),
        Err(e) => Err(Error::from(e)),
    }
}

/// Delete Subject
///
/// Deletes a subject and its counters given its identifier.
///
/// # Parameters
///
/// * `Extension(registry): Extension<Arc<Registry>>` - The registry extension wrapped in an `Arc`.
/// * `Path(subject_id): Path<String>` - The identifier of the subject as a path parameter.
///
/// # Returns
///
/// * `Result<Json<Confirmation>, Error>` - A confirmation message in JSON format or an error if the request fails.
#[utoipa::path(
    delete,
    path = "/subjects/{subject_id}",
    operation_id = "Delete Subject",
    tag = "Subject",
    params(
        ("subject_id" = String, Path, description = "Subjects unique id"),
    ),
    responses(
        (status = 200, description = "Subject deleted", body = Confirmation,
        example = json!(
            {
                "message": "Subject deleted successfully"
            }
        )),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal Server Error"),
    )
)]
async fn delete_subject(
    Extension(registry): Extension<Arc<Registry>>,
    Path(subject_id): Path<String>,
) -> Result<Json<Confirmation>, Error> {
    match registry.delete_subject(subject_id).await {
        Ok(()) => Ok(Json(Confirmation {
            message: "Subject deleted successfully".to_owned(),
        })),
        Err(e) => Err(Error::from(e)),
    }
}

pub fn build_routes(registry: Registry) -> Router {
    let registry = Arc::new(registry);
    let routes = Router::new()
        .route("/subjects", get(get_subjects))
        .route("/subjects", post(create_subject))
        .route("/subjects/{subject_id}/present", post(mark_present))
        .route("/subjects/{subject_id}/absent", post(mark_absent))
        .route("/subjects/{subject_id}", delete(delete_subject))
        .layer(ServiceBuilder::new().layer(Extension(registry)));

    if build_doc() {
        Router::new().merge(routes).merge(
            RapiDoc::with_openapi("/doc/attendanceapi.json", ApiDoc::openapi())
                .path("/doc"),
        )
    } else {
        Router::new().merge(routes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use attendance_registry::{
        Counter, Error as RegistryError, Registry, Subject, SubjectId,
        SubjectStore, store::memory::MemoryStore,
    };
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use test_log::test;
    use tower::ServiceExt;

    use super::build_routes;

    /// Store that behaves like a connection that never came up.
    struct OfflineStore;

    fn offline() -> RegistryError {
        RegistryError::Unavailable("Database not initialized".to_owned())
    }

    #[async_trait]
    impl SubjectStore for OfflineStore {
        async fn list(&self) -> Result<Vec<Subject>, RegistryError> {
            Err(offline())
        }

        async fn insert(&self, _name: &str) -> Result<Subject, RegistryError> {
            Err(offline())
        }

        async fn increment(
            &self,
            _id: &SubjectId,
            _counter: Counter,
        ) -> Result<(), RegistryError> {
            Err(offline())
        }

        async fn remove(&self, _id: &SubjectId) -> Result<(), RegistryError> {
            Err(offline())
        }
    }

    fn build_test_routes() -> Router {
        build_routes(Registry::with_store(Arc::new(MemoryStore::new())))
    }

    async fn request(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = if let Some(body) = body {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        } else {
            Body::empty()
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();

        (status, value)
    }

    #[test(tokio::test)]
    async fn test_create_mark_and_list_flow() {
        let router = build_test_routes();

        let (status, created) = request(
            &router,
            Method::POST,
            "/subjects",
            Some(json!({"name": "Math"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Math");
        assert_eq!(created["attended"], 0);
        assert_eq!(created["absent"], 0);
        let id = created["id"].as_str().unwrap().to_owned();
        assert_eq!(id.len(), 24);

        let (status, body) = request(
            &router,
            Method::POST,
            &format!("/subjects/{}/present", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Marked as present"}));

        let (status, body) =
            request(&router, Method::GET, "/subjects", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": id, "name": "Math", "attended": 1, "absent": 0}])
        );
    }

    #[test(tokio::test)]
    async fn test_create_requires_a_name() {
        let router = build_test_routes();

        let (status, body) =
            request(&router, Method::POST, "/subjects", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Subject name is required"}));

        let (status, body) = request(
            &router,
            Method::POST,
            "/subjects",
            Some(json!({"name": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "Subject name is required"}));

        let (status, body) =
            request(&router, Method::GET, "/subjects", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[test(tokio::test)]
    async fn test_create_keeps_padded_name_verbatim() {
        let router = build_test_routes();

        let (status, created) = request(
            &router,
            Method::POST,
            "/subjects",
            Some(json!({"name": "  History  "})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "  History  ");

        let (_, body) = request(&router, Method::GET, "/subjects", None).await;
        assert_eq!(body[0]["name"], "  History  ");
    }

    #[test(tokio::test)]
    async fn test_mark_absent_updates_counter() {
        let router = build_test_routes();

        let (_, created) = request(
            &router,
            Method::POST,
            "/subjects",
            Some(json!({"name": "History"})),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_owned();

        for _ in 0..2 {
            let (status, body) = request(
                &router,
                Method::POST,
                &format!("/subjects/{}/absent", id),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"message": "Marked as absent"}));
        }

        let (_, body) = request(&router, Method::GET, "/subjects", None).await;
        assert_eq!(body[0]["attended"], 0);
        assert_eq!(body[0]["absent"], 2);
    }

    #[test(tokio::test)]
    async fn test_unknown_subject_is_not_found() {
        let router = build_test_routes();
        let id = "ffffffffffffffffffffffff";

        let (status, body) = request(
            &router,
            Method::POST,
            &format!("/subjects/{}/present", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "Subject not found"}));

        let (status, _) = request(
            &router,
            Method::POST,
            &format!("/subjects/{}/absent", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = request(
            &router,
            Method::DELETE,
            &format!("/subjects/{}", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test(tokio::test)]
    async fn test_malformed_subject_id_is_rejected() {
        let router = build_test_routes();

        let (status, body) = request(
            &router,
            Method::POST,
            "/subjects/not-an-id/present",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Invalid subject id"), "{}", message);

        let (status, _) =
            request(&router, Method::DELETE, "/subjects/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test(tokio::test)]
    async fn test_delete_subject_flow() {
        let router = build_test_routes();

        let (_, math) = request(
            &router,
            Method::POST,
            "/subjects",
            Some(json!({"name": "Math"})),
        )
        .await;
        let math_id = math["id"].as_str().unwrap().to_owned();
        request(
            &router,
            Method::POST,
            "/subjects",
            Some(json!({"name": "History"})),
        )
        .await;

        let (status, body) = request(
            &router,
            Method::DELETE,
            &format!("/subjects/{}", math_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Subject deleted successfully"}));

        let (_, body) = request(&router, Method::GET, "/subjects", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "History");

        let (status, _) = request(
            &router,
            Method::DELETE,
            &format!("/subjects/{}", math_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test(tokio::test)]
    async fn test_requests_fail_before_store_is_ready() {
        let router = build_routes(Registry::with_store(Arc::new(OfflineStore)));

        let (status, body) =
            request(&router, Method::GET, "/subjects", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Database not initialized"}));

        let (status, body) = request(
            &router,
            Method::POST,
            "/subjects",
            Some(json!({"name": "Math"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Database not initialized"}));

        let (status, _) = request(
            &router,
            Method::POST,
            "/subjects/ffffffffffffffffffffffff/present",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
