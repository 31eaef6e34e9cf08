use axum::Json;
use serde_json::{Value, json};

/// GET /api/info - static description of the public endpoints
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "Personal Budget API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            {
                "method": "GET",
                "path": "/budget",
                "description": "List all budget items",
                "response": { "myBudget": "[BudgetEntry]" }
            },
            {
                "method": "POST",
                "path": "/budget",
                "description": "Create a budget item",
                "body": {
                    "title": "string, required, unique after trimming",
                    "budget": "number >= 0, required",
                    "color": "string, required, #RRGGBB or #RRGGBBAA"
                },
                "responses": { "201": "created", "400": "validation failed", "409": "title already exists" }
            },
            {
                "method": "POST",
                "path": "/signup",
                "description": "Register a user account",
                "body": {
                    "username": "string, required, at least 3 characters",
                    "password": "string, required, at least 6 characters",
                    "email": "string, optional, unique",
                    "first_name": "string, optional, 2-50 characters",
                    "last_name": "string, optional, 2-50 characters"
                },
                "responses": { "201": "created", "400": "validation failed", "409": "username or email already exists" }
            },
            {
                "method": "POST",
                "path": "/login",
                "description": "Check credentials",
                "body": { "username": "string", "password": "string" },
                "responses": { "200": "authenticated", "401": "invalid username or password" }
            },
            {
                "method": "GET",
                "path": "/users",
                "description": "Diagnostic listing of user accounts (bearer token when ADMIN_TOKEN is set)"
            },
            {
                "method": "GET",
                "path": "/health",
                "description": "Liveness check"
            }
        ],
        "errors": {
            "shape": { "error": "short code", "message": "human readable text" },
            "codes": [
                "missing-field", "invalid-amount", "invalid-color", "invalid-username",
                "invalid-password", "invalid-email", "invalid-name", "invalid-body",
                "duplicate-title", "duplicate-username", "duplicate-email",
                "invalid-credentials", "unauthorized", "store-timeout", "internal-error"
            ]
        }
    }))
}
