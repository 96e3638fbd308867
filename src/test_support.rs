//! In-memory ports shared by unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::auth::{
  AuthError, AuthService, AuthServiceConfig, Email, RepositoryError, Session, SessionRepository,
  SignInProvider, SignedIn, User, UserRepository,
};
use crate::domain::form::FormData;
use crate::domain::invoice::{
  Customer, CustomerRepository, Invoice, InvoiceChanges, InvoiceError, InvoiceRepository,
  InvoiceService, InvoiceServiceDependencies, InvoiceSummary, NewInvoice, PathRevalidator,
};
use crate::infrastructure::security::Argon2PasswordHasher;

/// Side effect observed by the fakes, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  Inserted(NewInvoice),
  Updated(String, InvoiceChanges),
  Deleted(String),
  Revalidated(String),
}

#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
  pub fn push(&self, event: Event) {
    self.0.lock().unwrap().push(event);
  }

  pub fn events(&self) -> Vec<Event> {
    self.0.lock().unwrap().clone()
  }
}

pub fn customers() -> Vec<Customer> {
  [
    ("c1", "Evil Rabbit", "evil@rabbit.com"),
    ("c2", "Delba de Oliveira", "delba@oliveira.com"),
    ("c3", "Lee Robinson", "lee@robinson.com"),
  ]
  .into_iter()
  .map(|(id, name, email)| Customer {
    id: id.to_string(),
    name: name.to_string(),
    email: email.to_string(),
  })
  .collect()
}

pub struct InMemoryInvoiceRepository {
  invoices: Mutex<Vec<Invoice>>,
  log: EventLog,
  fail: bool,
}

impl InMemoryInvoiceRepository {
  pub fn new(log: EventLog) -> Self {
    Self {
      invoices: Mutex::new(Vec::new()),
      log,
      fail: false,
    }
  }

  /// Every call fails as if the database were unreachable
  pub fn failing(log: EventLog) -> Self {
    Self {
      fail: true,
      ..Self::new(log)
    }
  }

  pub fn invoices(&self) -> Vec<Invoice> {
    self.invoices.lock().unwrap().clone()
  }

  fn check(&self) -> Result<(), InvoiceError> {
    if self.fail {
      return Err(InvoiceError::Repository("connection refused".to_string()));
    }
    Ok(())
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn insert(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    self.check()?;
    let stored = Invoice {
      id: Uuid::new_v4().to_string(),
      customer_id: invoice.customer_id.clone(),
      amount: invoice.amount,
      status: invoice.status,
      date: invoice.date,
    };
    self.invoices.lock().unwrap().push(stored.clone());
    self.log.push(Event::Inserted(invoice));
    Ok(stored)
  }

  async fn update(&self, id: &str, changes: InvoiceChanges) -> Result<u64, InvoiceError> {
    self.check()?;
    let mut updated = 0;
    for invoice in self.invoices.lock().unwrap().iter_mut() {
      if invoice.id == id {
        invoice.customer_id = changes.customer_id.clone();
        invoice.amount = changes.amount;
        invoice.status = changes.status;
        updated += 1;
      }
    }
    self.log.push(Event::Updated(id.to_string(), changes));
    Ok(updated)
  }

  async fn delete(&self, id: &str) -> Result<(), InvoiceError> {
    self.check()?;
    self.invoices.lock().unwrap().retain(|i| i.id != id);
    self.log.push(Event::Deleted(id.to_string()));
    Ok(())
  }

  async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>, InvoiceError> {
    self.check()?;
    Ok(self.invoices().into_iter().find(|i| i.id == id))
  }

  async fn list_summaries(&self) -> Result<Vec<InvoiceSummary>, InvoiceError> {
    self.check()?;
    let customers = customers();
    let mut summaries: Vec<InvoiceSummary> = self
      .invoices()
      .into_iter()
      .filter_map(|invoice| {
        let customer = customers.iter().find(|c| c.id == invoice.customer_id)?;
        Some(InvoiceSummary {
          id: invoice.id,
          customer_name: customer.name.clone(),
          customer_email: customer.email.clone(),
          amount: invoice.amount,
          status: invoice.status,
          date: invoice.date,
        })
      })
      .collect();
    summaries.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(summaries)
  }
}

pub struct StaticCustomerRepository;

#[async_trait]
impl CustomerRepository for StaticCustomerRepository {
  async fn list(&self) -> Result<Vec<Customer>, InvoiceError> {
    Ok(customers())
  }
}

pub struct RecordingRevalidator {
  log: EventLog,
}

impl RecordingRevalidator {
  pub fn new(log: EventLog) -> Self {
    Self { log }
  }
}

#[async_trait]
impl PathRevalidator for RecordingRevalidator {
  async fn revalidate_path(&self, path: &str) {
    self.log.push(Event::Revalidated(path.to_string()));
  }
}

pub fn invoice_service(repo: Arc<InMemoryInvoiceRepository>, log: EventLog) -> InvoiceService {
  InvoiceService::new(InvoiceServiceDependencies {
    invoice_repo: repo,
    customer_repo: Arc::new(StaticCustomerRepository),
    revalidator: Arc::new(RecordingRevalidator::new(log)),
  })
}

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: Mutex<Vec<User>>,
  fail: bool,
}

impl InMemoryUserRepository {
  pub fn failing() -> Self {
    Self {
      fail: true,
      ..Self::default()
    }
  }

  fn check(&self) -> Result<(), AuthError> {
    if self.fail {
      return Err(RepositoryError::ConnectionFailed("connection refused".to_string()).into());
    }
    Ok(())
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create_if_absent(&self, user: User) -> Result<bool, AuthError> {
    self.check()?;
    let mut users = self.users.lock().unwrap();
    if users.iter().any(|u| u.email == user.email) {
      return Ok(false);
    }
    users.push(user);
    Ok(true)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    self.check()?;
    Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    self.check()?;
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.email == email.as_str())
        .cloned(),
    )
  }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
  sessions: Mutex<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
  pub fn len(&self) -> usize {
    self.sessions.lock().unwrap().len()
  }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    self
      .sessions
      .lock()
      .unwrap()
      .insert(session.id, session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    Ok(
      self
        .sessions
        .lock()
        .unwrap()
        .values()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    self.sessions.lock().unwrap().remove(&session_id);
    Ok(())
  }
}

pub fn auth_service(
  users: Arc<InMemoryUserRepository>,
  sessions: Arc<InMemorySessionRepository>,
) -> AuthService {
  AuthService::new(
    users,
    sessions,
    Arc::new(Argon2PasswordHasher::new().unwrap()),
    AuthServiceConfig::default(),
  )
}

/// Sign-in provider that records its calls and always fails with a fixed error
pub struct ScriptedSignInProvider {
  error: fn() -> AuthError,
  calls: Mutex<Vec<(String, FormData)>>,
}

impl ScriptedSignInProvider {
  pub fn failing(error: fn() -> AuthError) -> Self {
    Self {
      error,
      calls: Mutex::new(Vec::new()),
    }
  }

  pub fn calls(&self) -> Vec<String> {
    self
      .calls
      .lock()
      .unwrap()
      .iter()
      .map(|(provider, _)| provider.clone())
      .collect()
  }

  pub fn last_form(&self) -> Option<FormData> {
    self
      .calls
      .lock()
      .unwrap()
      .last()
      .map(|(_, form)| form.clone())
  }
}

#[async_trait]
impl SignInProvider for ScriptedSignInProvider {
  async fn sign_in(&self, provider: &str, fields: &FormData) -> Result<SignedIn, AuthError> {
    self
      .calls
      .lock()
      .unwrap()
      .push((provider.to_string(), fields.clone()));
    Err((self.error)())
  }
}
