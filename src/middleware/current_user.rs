use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

/// Identidade usada nas rotas "meus dados". Não há login: todo request recebe o mesmo usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: u64,
}

/// Injeta `CurrentUser` nas extensões do request (lido com `web::ReqData<CurrentUser>`)
pub struct CurrentUserMiddleware {
    user_id: u64,
}

impl CurrentUserMiddleware {
    pub fn new(user_id: u64) -> Self {
        Self { user_id }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CurrentUserMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CurrentUserService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CurrentUserService {
            service,
            user_id: self.user_id,
        }))
    }
}

pub struct CurrentUserService<S> {
    service: S,
    user_id: u64,
}

impl<S, B> Service<ServiceRequest> for CurrentUserService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        req.extensions_mut().insert(CurrentUser { id: self.user_id });

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}
