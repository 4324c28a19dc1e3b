//! Rendering [`RdsOutput`] values and [`RdsError`]s as HTTP responses.

use bytes::Bytes;
use http::StatusCode;
use http::header::HeaderValue;
use mockstack_rds_model::{RdsError, RdsOperation};

use crate::dispatch::RdsOutput;
use crate::xml::{error_to_xml, output_to_xml};

/// Content type of every RDS body.
const XML_CONTENT_TYPE: &str = "text/xml";

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-amzn-RequestId";

fn build_response(status: StatusCode, body: Vec<u8>) -> Result<http::Response<Bytes>, RdsError> {
    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, XML_CONTENT_TYPE)
        .body(Bytes::from(body))
        .map_err(|e| RdsError::internal_error(format!("failed to build HTTP response: {e}")))
}

/// Render a successful call as a 200 response.
pub fn output_to_response(
    operation: RdsOperation,
    output: &RdsOutput,
    request_id: &str,
) -> Result<http::Response<Bytes>, RdsError> {
    let xml = output_to_xml(operation, output, request_id)
        .map_err(|e| RdsError::internal_error(format!("failed to serialize XML: {e}")))?;
    build_response(StatusCode::OK, xml)
}

/// Render an error as an `ErrorResponse` document with the error's status.
#[must_use]
pub fn error_to_response(err: &RdsError, request_id: &str) -> http::Response<Bytes> {
    let xml = error_to_xml(err.code.fault_type(), err.code.as_str(), &err.message, request_id);
    let mut resp = http::Response::new(Bytes::from(xml));
    *resp.status_mut() = err.status_code;
    resp.headers_mut().insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static(XML_CONTENT_TYPE),
    );
    resp
}

/// Attach the request-id header.
#[must_use]
pub fn add_request_id(mut resp: http::Response<Bytes>, request_id: &str) -> http::Response<Bytes> {
    if let Ok(hv) = HeaderValue::from_str(request_id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, hv);
    }
    resp
}
