use crate::client::NominatimClient;
use crate::error::GeocodeError;

use reqwest::Response as HttpResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

impl NominatimClient {
    // Reads the body once, then decodes it as `R` on success or as an error payload otherwise.
    pub(crate) async fn _send_and_process_response<R: DeserializeOwned + Send + 'static>(
        &self,
        response: HttpResponse,
        endpoint_context: &str,
    ) -> Result<R, GeocodeError> {
        let status = response.status();
        let response_url = response.url().to_string(); // For logging

        let response_text = response.text().await.map_err(GeocodeError::ReqwestError)?;

        if status.is_success() {
            log::debug!("Request successful. Response body: {}", &response_text);
            serde_json::from_str::<R>(&response_text).map_err(|e| {
                log::error!(
                    "JSON Deserialization failed for successful '{}' response from '{}'. Status: {}. Error: {}. Body: {}",
                    endpoint_context,
                    response_url,
                    status,
                    e,
                    &response_text
                );
                GeocodeError::JsonDeserializationFailed(format!(
                    "Failed to deserialize successful '{}' response from '{}': {}. Body: {}",
                    endpoint_context, response_url, e, &response_text
                ))
            })
        } else {
            log::warn!(
                "Request to '{}' ({}) failed with status {} and body: {}",
                endpoint_context,
                response_url,
                status,
                &response_text
            );
            let parsed_body: Value = match serde_json::from_str(&response_text) {
                Ok(json_val) => json_val,
                Err(_) => serde_json::json!({
                    "error": format!(
                        "HTTP Error {} with non-JSON body: {}",
                        status,
                        response_text.chars().take(100).collect::<String>()
                    )
                }),
            };
            Err(GeocodeError::from_response(status.as_u16(), parsed_body))
        }
    }
}
