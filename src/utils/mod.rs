pub mod api_response;
pub mod jwt_utils;
pub mod reading_time;
pub mod validated_wrapper;
pub mod validator_utils;
