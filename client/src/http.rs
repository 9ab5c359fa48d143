//! HTTP access to the staffdesk API

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::token_store::{MemoryTokenStore, StoredSession, TokenStore};
use crate::types::{
    Credentials, Department, DepartmentPatch, Employee, EmployeePatch, EmployeeQuery, Envelope,
    LogoutAll, NewDepartment, NewEmployee, Page, Role, Session, Signup, SortOrder, UserInfo,
};

/// Error body shape shared by every failing endpoint
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for one staffdesk server.
///
/// The bearer token is read from the [`TokenStore`] on every request, so a
/// login performed through one clone is visible to all of them.
#[derive(Clone)]
pub struct StaffClient {
    http: Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for StaffClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.store.token().is_some())
            .finish()
    }
}

impl StaffClient {
    /// Client with an in-memory session.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_store(base_url, Arc::new(MemoryTokenStore::new()))
    }

    pub fn with_store(base_url: &str, store: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<StoredSession> {
        self.store.load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.token().is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.store.role()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.http.request(method, url);
        match self.store.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Map non-2xx statuses to [`ClientError`], decode the body otherwise.
    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            debug!(status = status.as_u16(), %message, "Request failed");
            return Err(ClientError::from_status(status.as_u16(), message));
        }
        Ok(response.json().await?)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let envelope: Envelope<T> = self.decode(req.send().await?).await?;
        if !envelope.success {
            return Err(ClientError::InvalidResponse(
                envelope.error.unwrap_or_else(|| "Unknown error".into()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".into()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn remember(&self, session: &Session) -> ClientResult<()> {
        self.store.save(&StoredSession {
            token: session.token.clone(),
            user: session.user.clone(),
        })
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn signup(&self, email: &str, password: &str, role: Role) -> ClientResult<Session> {
        let body = Signup {
            email: email.to_string(),
            password: password.to_string(),
            role,
        };
        let session: Session = self.post("/api/auth/signup", &body).await?;
        self.remember(&session)?;
        Ok(session)
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let session: Session = self.post("/api/auth/login", &body).await?;
        self.remember(&session)?;
        Ok(session)
    }

    /// Revoke the current token. The local session is dropped even when the
    /// server already considered it invalid.
    pub async fn logout(&self) -> ClientResult<()> {
        let result: ClientResult<serde_json::Value> =
            self.send(self.request(Method::POST, "/api/auth/logout")).await;
        self.store.clear()?;
        result.map(|_| ())
    }

    pub async fn logout_all(&self) -> ClientResult<u64> {
        let result: ClientResult<LogoutAll> =
            self.send(self.request(Method::POST, "/api/auth/logout-all")).await;
        self.store.clear()?;
        result.map(|r| r.revoked)
    }

    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("/api/auth/me").await
    }

    pub async fn delete_account(&self) -> ClientResult<()> {
        let _: serde_json::Value = self.delete("/api/auth/me").await?;
        self.store.clear()?;
        Ok(())
    }

    // ── Departments ─────────────────────────────────────────────

    pub async fn list_departments(&self) -> ClientResult<Vec<Department>> {
        self.get("/api/departments").await
    }

    pub async fn get_department(&self, id: &str) -> ClientResult<Department> {
        self.get(&format!("/api/departments/{}", id)).await
    }

    pub async fn create_department(&self, name: &str) -> ClientResult<Department> {
        let body = NewDepartment {
            name: name.to_string(),
        };
        self.post("/api/departments", &body).await
    }

    pub async fn update_department(
        &self,
        id: &str,
        patch: &DepartmentPatch,
    ) -> ClientResult<Department> {
        self.patch(&format!("/api/departments/{}", id), patch).await
    }

    pub async fn delete_department(&self, id: &str) -> ClientResult<Department> {
        self.delete(&format!("/api/departments/{}", id)).await
    }

    // ── Employees ───────────────────────────────────────────────

    /// The paged listing is returned bare, without the envelope.
    pub async fn list_employees(&self, query: &EmployeeQuery) -> ClientResult<Page<Employee>> {
        let req = self
            .request(Method::GET, "/api/employees")
            .query(&query.to_pairs());
        self.decode(req.send().await?).await
    }

    pub async fn get_employee(&self, id: &str) -> ClientResult<Employee> {
        self.get(&format!("/api/employees/{}", id)).await
    }

    pub async fn create_employee(&self, employee: &NewEmployee) -> ClientResult<Employee> {
        self.post("/api/employees", employee).await
    }

    pub async fn update_employee(&self, id: &str, patch: &EmployeePatch) -> ClientResult<Employee> {
        self.patch(&format!("/api/employees/{}", id), patch).await
    }

    pub async fn delete_employee(&self, id: &str) -> ClientResult<Employee> {
        self.delete(&format!("/api/employees/{}", id)).await
    }

    pub async fn employees_sorted_by_location(
        &self,
        order: SortOrder,
    ) -> ClientResult<Vec<Employee>> {
        let req = self
            .request(Method::GET, "/api/employees/sorted/location")
            .query(&[("order", order.as_str())]);
        self.send(req).await
    }

    pub async fn employees_sorted_by_name(&self, order: SortOrder) -> ClientResult<Vec<Employee>> {
        let req = self
            .request(Method::GET, "/api/employees/sorted/name")
            .query(&[("order", order.as_str())]);
        self.send(req).await
    }
}
