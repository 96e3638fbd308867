use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header,
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};

use crate::application::auth::{GetCurrentUserResponse, GetCurrentUserUseCase};

/// Name of the cookie holding the raw session token
pub const SESSION_COOKIE: &str = "session_token";

const LOGIN_PATH: &str = "/login";

/// Signed-in user attached to request extensions
pub type CurrentUser = GetCurrentUserResponse;

/// Cookie-session guard for dashboard routes.
///
/// Requests without a valid session are redirected to the login page. On
/// success the user is stored in request extensions as [`CurrentUser`].
pub struct WebAuthMiddleware {
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl WebAuthMiddleware {
  pub fn new(get_user_use_case: Arc<GetCurrentUserUseCase>) -> Self {
    Self { get_user_use_case }
  }
}

impl<S, B> Transform<S, ServiceRequest> for WebAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = WebAuthMiddlewareService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(WebAuthMiddlewareService {
      service: Rc::new(service),
      get_user_use_case: self.get_user_use_case.clone(),
    }))
  }
}

pub struct WebAuthMiddlewareService<S> {
  service: Rc<S>,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl<S, B> Service<ServiceRequest> for WebAuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
    let get_user_use_case = self.get_user_use_case.clone();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let user = match token {
        Some(token) => match get_user_use_case.execute(token).await {
          Ok(user) => Some(user),
          Err(e) => {
            tracing::debug!("Rejected session for {}: {}", req.path(), e);
            None
          }
        },
        None => None,
      };

      match user {
        Some(user) => {
          req.extensions_mut().insert(user);
          let res = service.call(req).await?;
          Ok(res.map_into_left_body())
        }
        None => {
          let res = req.into_response(
            HttpResponse::Found()
              .insert_header((header::LOCATION, LOGIN_PATH))
              .finish(),
          );
          Ok(res.map_into_right_body())
        }
      }
    })
  }
}
