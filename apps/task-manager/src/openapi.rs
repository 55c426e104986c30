use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Task Manager API",
        version = "0.1.0",
        description = "Create, list, update and delete tasks"
    ),
    nest(
        (path = "/task", api = domain_tasks::TasksApiDoc)
    )
)]
pub struct ApiDoc;
