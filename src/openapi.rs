use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bazaar API",
        version = "0.1.0",
        description = "Customer-to-customer marketplace: product catalog, carts and orders, product ratings and reviews. \
            Authenticate with `Authorization: Bearer <token>` obtained from /register or /login."
    ),
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::customers::list_customers,
        crate::handlers::customers::update_customer,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::get_order,
        crate::handlers::orders::create_order,
        crate::handlers::orders::update_order,
        crate::handlers::orders::delete_order,
        crate::handlers::line_items::list_line_items,
        crate::handlers::line_items::get_line_item,
        crate::handlers::line_items::create_line_item,
        crate::handlers::line_items::update_line_item,
        crate::handlers::line_items::delete_line_item,
        crate::handlers::ratings::list_ratings,
        crate::handlers::ratings::get_rating,
        crate::handlers::ratings::create_rating,
        crate::handlers::ratings::update_rating,
        crate::handlers::ratings::delete_rating,
        crate::handlers::reviews::list_reviews,
        crate::handlers::reviews::get_review,
        crate::handlers::reviews::create_review,
        crate::handlers::reviews::update_review,
        crate::handlers::reviews::delete_review,
    ),
    components(schemas(
        crate::auth::RegisterInput,
        crate::auth::LoginInput,
        crate::auth::IssuedToken,
        crate::handlers::auth::LoginResponse,
        crate::services::customers::AccountInfo,
        crate::services::customers::CustomerProfile,
        crate::services::customers::UpdateProfileInput,
        crate::services::catalog::CreateProductInput,
        crate::services::catalog::UpdateProductInput,
        crate::services::catalog::ProductResponse,
        crate::services::orders::CreateOrderInput,
        crate::services::orders::UpdateOrderInput,
        crate::services::orders::AddLineItemInput,
        crate::services::orders::UpdateLineItemInput,
        crate::services::orders::OrderLineItem,
        crate::services::orders::OrderResponse,
        crate::services::orders::OrderSummary,
        crate::services::orders::LineItemResponse,
        crate::services::feedback::CreateRatingInput,
        crate::services::feedback::UpdateRatingInput,
        crate::services::feedback::RatingResponse,
        crate::services::feedback::CreateReviewInput,
        crate::services::feedback::UpdateReviewInput,
        crate::services::feedback::ReviewResponse,
        crate::errors::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "customers", description = "Customer profiles"),
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Customer orders"),
        (name = "line items", description = "Order line items"),
        (name = "ratings", description = "Product ratings"),
        (name = "reviews", description = "Product reviews"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI with the generated document mounted under /api-docs.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
