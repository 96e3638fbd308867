use actix_web::{
  Error, HttpMessage,
  body::MessageBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::{HeaderName, HeaderValue},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
};
use uuid::Uuid;

/// Tags every request with a UUID v4.
///
/// The id is stored in request extensions as [`RequestId`], recorded on the
/// current tracing span and echoed in the `X-Request-ID` response header.
#[derive(Debug, Clone, Default)]
pub struct RequestIdMiddleware;

impl RequestIdMiddleware {
  pub fn new() -> Self {
    Self
  }
}

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = RequestIdMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(RequestIdMiddlewareService {
      service: Rc::new(service),
    }))
  }
}

pub struct RequestIdMiddlewareService<S> {
  service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: MessageBody + 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let request_id = RequestId(Uuid::new_v4());
      req.extensions_mut().insert(request_id);
      tracing::Span::current().record("request_id", request_id.to_string());

      let mut res = service.call(req).await?;

      if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        res
          .headers_mut()
          .insert(HeaderName::from_static("x-request-id"), value);
      }

      Ok(res)
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl std::fmt::Display for RequestId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Reads the [`RequestId`] stored by [`RequestIdMiddleware`]
pub trait RequestIdExt {
  fn request_id(&self) -> Option<RequestId>;
}

impl RequestIdExt for actix_web::HttpRequest {
  fn request_id(&self) -> Option<RequestId> {
    self.extensions().get::<RequestId>().copied()
  }
}
