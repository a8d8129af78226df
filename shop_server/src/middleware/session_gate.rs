//! Session gate middleware.
//!
//! Wrap a scope or resource with [`SessionGateFactory`] and every request to it must carry a currently valid session
//! token in an `Authorization: Bearer <token>` header. Requests that don't are answered with a 401 and never reach the
//! wrapped service. Requests that do have their token's subject attached as an [`AuthenticatedIdentity`].
//!
//! Clients only learn whether their credential was missing, malformed, or simply not accepted. Why a token was not
//! accepted (bad signature, expired, garbled) is logged at debug level and nowhere else.

use std::{pin::Pin, rc::Rc, sync::Arc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use log::*;
use shop_engine::auth::TokenCodec;

use crate::{
    auth::{extract_bearer_token, AuthenticatedIdentity},
    errors::{AuthError, ServerError},
};

pub struct SessionGateFactory {
    codec: Arc<dyn TokenCodec>,
}

impl SessionGateFactory {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        SessionGateFactory { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGateFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionGateService { codec: Arc::clone(&self.codec), service: Rc::new(service) })
    }
}

pub struct SessionGateService<S> {
    codec: Arc<dyn TokenCodec>,
    service: Rc<S>,
}

impl<S> SessionGateService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<AuthenticatedIdentity, AuthError> {
        let token = extract_bearer_token(req.headers()).map_err(|e| {
            debug!("🔐️ Rejecting request to {}. {e}", req.path());
            e
        })?;
        let subject = self.codec.verify(token).map_err(|e| {
            debug!("🔐️ Rejecting session token for {}. {e}", req.path());
            AuthError::InvalidToken
        })?;
        trace!("🔐️ {subject} authenticated for {}", req.path());
        Ok(AuthenticatedIdentity::new(subject))
    }
}

impl<S, B> Service<ServiceRequest> for SessionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let identity = self.authenticate(&req);
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let identity = identity.map_err(ServerError::from)?;
            req.extensions_mut().insert(identity);
            service.call(req).await
        })
    }
}
