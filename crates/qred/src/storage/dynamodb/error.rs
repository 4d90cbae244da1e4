//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `qred_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use qred_core::storage::RepositoryError;

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    match err {
        SdkError::DispatchFailure(failure) => map_connection_error(format!("{:?}", failure)),
        SdkError::TimeoutError(_) => map_connection_error("GetItem timed out"),
        err => match err.into_service_error() {
            GetItemError::ResourceNotFoundException(_) => {
                RepositoryError::QueryFailed("Table not found".to_string())
            }
            GetItemError::ProvisionedThroughputExceededException(_) => {
                RepositoryError::Throttled("Throughput exceeded".to_string())
            }
            GetItemError::RequestLimitExceeded(_) => {
                RepositoryError::Throttled("Request limit exceeded".to_string())
            }
            GetItemError::InternalServerError(_) => {
                RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
            }
            err => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", err)),
        },
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    match err {
        SdkError::DispatchFailure(failure) => map_connection_error(format!("{:?}", failure)),
        SdkError::TimeoutError(_) => map_connection_error("Query timed out"),
        err => match err.into_service_error() {
            QueryError::ResourceNotFoundException(_) => {
                RepositoryError::QueryFailed("Table not found".to_string())
            }
            QueryError::ProvisionedThroughputExceededException(_) => {
                RepositoryError::Throttled("Throughput exceeded".to_string())
            }
            QueryError::RequestLimitExceeded(_) => {
                RepositoryError::Throttled("Request limit exceeded".to_string())
            }
            QueryError::InternalServerError(_) => {
                RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
            }
            err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
        },
    }
}

/// Map a generic connection error to RepositoryError.
pub fn map_connection_error(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::ConnectionFailed(err.to_string())
}
