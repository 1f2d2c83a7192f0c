//! Property routes: registration, verification, lookup, bundled images.

use axum::{
    extract::{Path, State},
    response::Json,
};
use ethers::utils::keccak256;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::server::AppState;
use crate::api::validation::{validate_hash, validate_property_address};
use crate::chain::PropertyRecord;
use crate::utils::images::{property_images_by_id, property_thumbnail_by_id, PropertyType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    pub property_address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPropertyResponse {
    pub message: String,
    pub property_address: String,
    pub property_hash: String,
    pub tx: String,
}

/// The on-chain key for a property is the keccak hash of its address
/// string.
fn property_hash(address: &str) -> [u8; 32] {
    keccak256(address.as_bytes())
}

fn hex_hash(hash: [u8; 32]) -> String {
    format!("0x{}", hex::encode(hash))
}

/// POST /api/verify-property
pub async fn verify_property(
    State(state): State<AppState>,
    Json(req): Json<PropertyRequest>,
) -> Result<Json<VerifyPropertyResponse>, ApiError> {
    let address = req
        .property_address
        .ok_or_else(|| ApiError::bad_request("Property address required"))?;
    validate_property_address(&address)?;

    let hash = property_hash(&address);
    let outcome = state
        .chain
        .submit_property_verification(hash)
        .await
        .map_err(|e| {
            error!("verify-property failed for {address:?}: {e}");
            ApiError::with_details(
                500,
                "Failed to verify property".to_string(),
                serde_json::json!({ "details": e.to_string() }),
            )
        })?;

    info!("property {address:?} verified in {}", outcome.tx_hash);

    Ok(Json(VerifyPropertyResponse {
        message: "Property verified".to_string(),
        property_address: address,
        property_hash: hex_hash(hash),
        tx: outcome.tx_hash,
    }))
}

/// POST /api/add-property
pub async fn add_property(
    State(state): State<AppState>,
    Json(req): Json<PropertyRequest>,
) -> Result<Json<VerifyPropertyResponse>, ApiError> {
    let address = req
        .property_address
        .ok_or_else(|| ApiError::bad_request("Property address required"))?;
    validate_property_address(&address)?;

    let hash = property_hash(&address);
    let outcome = state
        .chain
        .submit_property_registration(address.clone())
        .await
        .map_err(|e| {
            error!("add-property failed for {address:?}: {e}");
            ApiError::with_details(
                500,
                "Failed to register property".to_string(),
                serde_json::json!({ "details": e.to_string() }),
            )
        })?;

    info!("property {address:?} registered in {}", outcome.tx_hash);

    Ok(Json(VerifyPropertyResponse {
        message: "Property registered".to_string(),
        property_address: address,
        property_hash: hex_hash(hash),
        tx: outcome.tx_hash,
    }))
}

/// GET /api/properties/:hash
pub async fn get_property(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<PropertyRecord>, ApiError> {
    let key = validate_hash(&hash)?;

    let property = state.chain.fetch_property(key).await.map_err(|e| {
        error!("property lookup failed for {hash}: {e}");
        ApiError::internal_server_error(&e.to_string())
    })?;

    if !property.is_registered() {
        return Err(ApiError::not_found("Property not found"));
    }

    Ok(Json(property))
}

#[derive(Debug, Serialize)]
pub struct PropertyImagesResponse {
    pub images: Vec<String>,
    pub thumbnail: String,
}

/// GET /api/property-images/:type/:id
///
/// Total lookup: unknown types or ids outside the configured sets answer
/// with empty results rather than an error.
pub async fn get_property_images(
    Path((kind, id)): Path<(String, i64)>,
) -> Json<PropertyImagesResponse> {
    let Some(kind) = PropertyType::parse(&kind) else {
        return Json(PropertyImagesResponse {
            images: Vec::new(),
            thumbnail: String::new(),
        });
    };

    Json(PropertyImagesResponse {
        images: property_images_by_id(kind, id)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        thumbnail: property_thumbnail_by_id(kind, id).to_string(),
    })
}
