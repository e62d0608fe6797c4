use super::ApplicationEnv;
use crate::auth::JwtAuthorizationValidator;
use tower_http::{
    trace::{HttpMakeClassifier, TraceLayer},
    validate_request::ValidateRequestHeaderLayer,
};

pub struct ApplicationMiddleware {
    pub auth: ValidateRequestHeaderLayer<JwtAuthorizationValidator>,
    pub trace: TraceLayer<HttpMakeClassifier>,
}

pub fn create_middleware(env: &ApplicationEnv) -> ApplicationMiddleware {
    let auth = ValidateRequestHeaderLayer::custom(JwtAuthorizationValidator::new(
        env.jwt_key.clone(),
        env.jwt_algorithms.clone(),
    ));

    let trace = TraceLayer::new_for_http();

    ApplicationMiddleware { auth, trace }
}
