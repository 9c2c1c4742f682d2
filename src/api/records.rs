//! Vehicle and Client Lookups
//!
//! Fetch a full record by id when the id fields change.

use leptos_autocomplete::with_query;

use super::{get_json, ApiError};
use crate::models::{CarInfoResponse, ClientInfoResponse};

pub fn car_info_url(base: &str, car_id: &str) -> String {
    with_query(base, &[("car_id", car_id)])
}

pub fn client_info_url(base: &str, client_id: &str) -> String {
    with_query(base, &[("client_id", client_id)])
}

pub async fn fetch_car_info(base: &str, car_id: &str) -> Result<CarInfoResponse, ApiError> {
    get_json(&car_info_url(base, car_id)).await
}

pub async fn fetch_client_info(base: &str, client_id: &str) -> Result<ClientInfoResponse, ApiError> {
    get_json(&client_info_url(base, client_id)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_urls() {
        assert_eq!(car_info_url("/poruchki/get-car-info/", "12"), "/poruchki/get-car-info/?car_id=12");
        assert_eq!(
            client_info_url("/poruchki/get-client-info/", "7"),
            "/poruchki/get-client-info/?client_id=7"
        );
    }
}
