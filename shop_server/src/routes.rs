//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests:
//! ```nocompile
//!     fn my_handler() -> impl Responder {
//!         std::thread::sleep(Duration::from_secs(5)); // <-- Bad practice! Will cause the current worker thread to
//! hang!
//!     }
//! ```
//! For this reason, any long, non-cpu-bound operation (e.g. I/O, database operations, etc.) should be expressed as
//! futures or asynchronous functions. Password hashing is CPU-bound, so the credential API hands it to the blocking
//! thread pool.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use shop_engine::{auth::PasswordHasher, CredentialApi, UserManagement};

use crate::{
    auth::AuthenticatedIdentity,
    data_objects::{CredentialsRequest, JsonResponse, LoginResponse, ProtectedResponse, UserSummary},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

/// JSON extractor configuration that reports unreadable bodies as a JSON error rather than plain text.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Could not deserialize request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Register  ----------------------------------------------------
route!(register => Post "/register" impl UserManagement, PasswordHasher);
pub async fn register<B, H>(
    body: web::Json<CredentialsRequest>,
    api: web::Data<CredentialApi<B, H>>,
) -> Result<HttpResponse, ServerError>
where
    B: UserManagement,
    H: PasswordHasher + 'static,
{
    trace!("💻️ Received registration request for {}", body.username);
    let CredentialsRequest { username, password } = body.into_inner();
    api.register(&username, &password).await?;
    Ok(HttpResponse::Created().json(JsonResponse::new("User registered successfully")))
}

// ----------------------------------------------   Login  ----------------------------------------------------
route!(login => Post "/login" impl UserManagement, PasswordHasher);
pub async fn login<B, H>(
    body: web::Json<CredentialsRequest>,
    api: web::Data<CredentialApi<B, H>>,
) -> Result<HttpResponse, ServerError>
where
    B: UserManagement,
    H: PasswordHasher + 'static,
{
    trace!("💻️ Received login request for {}", body.username);
    let CredentialsRequest { username, password } = body.into_inner();
    let grant = api.login(&username, &password).await?;
    let response = LoginResponse {
        message: "Login successful".to_string(),
        token: grant.token,
        user: UserSummary::from(&grant.user),
    };
    Ok(HttpResponse::Ok().json(response))
}

// ----------------------------------------------   Protected  ----------------------------------------------------
#[get("/protected")]
pub async fn protected(identity: AuthenticatedIdentity) -> impl Responder {
    trace!("💻️ Protected endpoint accessed by {}", identity.subject);
    HttpResponse::Ok().json(ProtectedResponse {
        message: "This is a protected endpoint".to_string(),
        username: identity.subject,
    })
}

route!(me => Get "/me" impl UserManagement, PasswordHasher);
pub async fn me<B, H>(
    identity: AuthenticatedIdentity,
    api: web::Data<CredentialApi<B, H>>,
) -> Result<HttpResponse, ServerError>
where
    B: UserManagement,
    H: PasswordHasher + 'static,
{
    trace!("💻️ Fetching account for {}", identity.subject);
    let account = api
        .account_for(&identity.subject)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("No account exists for {}", identity.subject)))?;
    Ok(HttpResponse::Ok().json(account.profile()))
}
