//! List view state kept in sync with the server.
//!
//! Boards hold a non-authoritative copy of what the server returned. Each
//! mutation goes to the server first and is then folded into the local
//! list: prepend on create, replace by id on update, drop on delete. A
//! failed call leaves the list untouched and raises the banner.

use tracing::warn;

use crate::banner::ErrorBanner;
use crate::error::ClientResult;
use crate::http::StaffClient;
use crate::types::{
    Department, DepartmentPatch, Employee, EmployeePatch, EmployeeQuery, NewEmployee, Page, Role,
    SortField, SortOrder,
};

/// Rows per page requested by the employee board.
pub const DEFAULT_PAGE_SIZE: u32 = 4;

fn matches_term(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.trim().to_lowercase())
}

/// Pages needed for `total` rows; an unpaged query is one page.
fn page_count(total: u64, limit: Option<u32>) -> u32 {
    match limit {
        _ if total == 0 => 0,
        None => 1,
        Some(0) => 0,
        Some(limit) => total.div_ceil(u64::from(limit)) as u32,
    }
}

fn prepend<T>(list: &mut Vec<T>, item: T) {
    list.insert(0, item);
}

fn replace_by_id<T>(list: &mut [T], item: T, id: impl Fn(&T) -> &str) {
    let target = id(&item).to_string();
    if let Some(slot) = list.iter_mut().find(|existing| id(existing) == target) {
        *slot = item;
    }
}

fn remove_by_id<T>(list: &mut Vec<T>, target: &str, id: impl Fn(&T) -> &str) {
    list.retain(|existing| id(existing) != target);
}

/// Raise `message` on failure and hand the result back unchanged.
fn report<T>(banner: &mut ErrorBanner, message: &str, result: ClientResult<T>) -> ClientResult<T> {
    if let Err(e) = &result {
        warn!(error = %e, "{}", message);
        banner.raise(message);
    }
    result
}

// ── Employees ───────────────────────────────────────────────────

#[derive(Debug)]
pub struct EmployeeBoard {
    client: StaffClient,
    employees: Vec<Employee>,
    departments: Vec<Department>,
    query: EmployeeQuery,
    total: u64,
    total_pages: u32,
    banner: ErrorBanner,
}

impl EmployeeBoard {
    pub fn new(client: StaffClient) -> Self {
        Self {
            client,
            employees: Vec::new(),
            departments: Vec::new(),
            query: EmployeeQuery {
                page: Some(1),
                limit: Some(DEFAULT_PAGE_SIZE),
                ..Default::default()
            },
            total: 0,
            total_pages: 0,
            banner: ErrorBanner::new(),
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Departments offered by the assignment picker.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn query(&self) -> &EmployeeQuery {
        &self.query
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page(&self) -> u32 {
        self.query.page.unwrap_or(1)
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn dismiss_error(&mut self) {
        self.banner.dismiss();
    }

    /// Whether edit controls should be shown. The server still decides.
    pub fn can_manage(&self) -> bool {
        self.client.role() == Some(Role::Manager)
    }

    /// Case-insensitive substring match on the names already fetched.
    pub fn search(&self, term: &str) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| matches_term(&e.name, term))
            .collect()
    }

    fn apply_page(&mut self, page: Page<Employee>) {
        self.total = page.total;
        self.total_pages = page.total_pages;
        self.employees = page.items;
    }

    fn set_total(&mut self, total: u64) {
        self.total = total;
        self.total_pages = page_count(total, self.query.limit);
    }

    fn record_created(&mut self, employee: Employee) {
        prepend(&mut self.employees, employee);
        self.set_total(self.total + 1);
    }

    fn record_deleted(&mut self, id: &str) {
        remove_by_id(&mut self.employees, id, |e| e.id.as_str());
        self.set_total(self.total.saturating_sub(1));
    }

    /// Fetch the current page with the current filters.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let result = self.client.list_employees(&self.query).await;
        let page = report(&mut self.banner, "Failed to fetch employees", result)?;
        self.apply_page(page);
        Ok(())
    }

    pub async fn load_departments(&mut self) -> ClientResult<()> {
        let result = self.client.list_departments().await;
        self.departments = report(&mut self.banner, "Failed to fetch departments", result)?;
        Ok(())
    }

    /// Apply name/location filters and go back to the first page.
    pub async fn set_filter(
        &mut self,
        name: Option<String>,
        location: Option<String>,
    ) -> ClientResult<()> {
        self.query.name = name;
        self.query.location = location;
        self.query.page = Some(1);
        self.refresh().await
    }

    pub async fn set_sort(&mut self, field: SortField, order: SortOrder) -> ClientResult<()> {
        self.query.sort = field;
        self.query.order = order;
        self.refresh().await
    }

    pub async fn set_page(&mut self, page: u32) -> ClientResult<()> {
        self.query.page = Some(page.max(1));
        self.refresh().await
    }

    pub async fn next_page(&mut self) -> ClientResult<()> {
        if self.page() >= self.total_pages {
            return Ok(());
        }
        self.set_page(self.page() + 1).await
    }

    pub async fn previous_page(&mut self) -> ClientResult<()> {
        if self.page() <= 1 {
            return Ok(());
        }
        self.set_page(self.page() - 1).await
    }

    pub async fn create(&mut self, employee: NewEmployee) -> ClientResult<Employee> {
        let result = self.client.create_employee(&employee).await;
        let created = report(&mut self.banner, "Failed to add employee", result)?;
        self.record_created(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, patch: EmployeePatch) -> ClientResult<Employee> {
        let result = self.client.update_employee(id, &patch).await;
        let updated = report(&mut self.banner, "Failed to update employee", result)?;
        replace_by_id(&mut self.employees, updated.clone(), |e| e.id.as_str());
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> ClientResult<()> {
        let result = self.client.delete_employee(id).await;
        report(&mut self.banner, "Failed to delete employee", result)?;
        self.record_deleted(id);
        Ok(())
    }

    /// Point an employee at a department (or detach with `None`), then
    /// refetch so the embedded department is current.
    pub async fn assign_department(
        &mut self,
        employee_id: &str,
        department_id: Option<String>,
    ) -> ClientResult<()> {
        let patch = EmployeePatch {
            department_id: Some(department_id),
            ..Default::default()
        };
        let result = self.client.update_employee(employee_id, &patch).await;
        report(&mut self.banner, "Failed to assign department", result)?;
        self.refresh().await
    }
}

// ── Departments ─────────────────────────────────────────────────

#[derive(Debug)]
pub struct DepartmentBoard {
    client: StaffClient,
    departments: Vec<Department>,
    banner: ErrorBanner,
}

impl DepartmentBoard {
    pub fn new(client: StaffClient) -> Self {
        Self {
            client,
            departments: Vec::new(),
            banner: ErrorBanner::new(),
        }
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn dismiss_error(&mut self) {
        self.banner.dismiss();
    }

    pub fn can_manage(&self) -> bool {
        self.client.role() == Some(Role::Manager)
    }

    pub fn search(&self, term: &str) -> Vec<&Department> {
        self.departments
            .iter()
            .filter(|d| matches_term(&d.name, term))
            .collect()
    }

    pub async fn refresh(&mut self) -> ClientResult<()> {
        let result = self.client.list_departments().await;
        self.departments = report(&mut self.banner, "Failed to fetch departments", result)?;
        Ok(())
    }

    pub async fn create(&mut self, name: &str) -> ClientResult<Department> {
        let result = self.client.create_department(name).await;
        let created = report(&mut self.banner, "Failed to add department", result)?;
        prepend(&mut self.departments, created.clone());
        Ok(created)
    }

    pub async fn rename(&mut self, id: &str, name: &str) -> ClientResult<Department> {
        let patch = DepartmentPatch {
            name: Some(name.to_string()),
            ..Default::default()
        };
        self.update(id, patch).await
    }

    pub async fn update(&mut self, id: &str, patch: DepartmentPatch) -> ClientResult<Department> {
        let result = self.client.update_department(id, &patch).await;
        let updated = report(&mut self.banner, "Failed to update department", result)?;
        replace_by_id(&mut self.departments, updated.clone(), |d| d.id.as_str());
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> ClientResult<()> {
        let result = self.client.delete_department(id).await;
        report(&mut self.banner, "Failed to delete department", result)?;
        remove_by_id(&mut self.departments, id, |d| d.id.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: name.to_string(),
            location: "NY".to_string(),
            department_id: None,
            department: None,
            user_id: None,
            user: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Nothing listens here, so every request fails fast.
    fn offline_client() -> StaffClient {
        StaffClient::new("http://127.0.0.1:9").unwrap()
    }

    #[test]
    fn list_helpers_reconcile_by_id() {
        let mut list = vec![employee("1", "Ann"), employee("2", "Bob")];

        prepend(&mut list, employee("3", "Cy"));
        assert_eq!(list[0].id, "3");

        replace_by_id(&mut list, employee("2", "Robert"), |e| e.id.as_str());
        assert_eq!(list[2].name, "Robert");

        // unknown ids are ignored
        replace_by_id(&mut list, employee("9", "Nobody"), |e| e.id.as_str());
        assert_eq!(list.len(), 3);

        remove_by_id(&mut list, "1", |e| e.id.as_str());
        let ids: Vec<_> = list.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut board = EmployeeBoard::new(offline_client());
        board.apply_page(Page {
            items: vec![employee("1", "Ann Lee"), employee("2", "Bob"), employee("3", "JOANNA")],
            total: 3,
            page: 1,
            limit: 4,
            total_pages: 1,
        });

        let hits: Vec<_> = board.search("ann").iter().map(|e| e.id.clone()).collect();
        assert_eq!(hits, vec!["1", "3"]);
        assert_eq!(board.search("").len(), 3);
        assert!(board.search("zed").is_empty());
    }

    #[test]
    fn page_count_follows_total_and_limit() {
        assert_eq!(page_count(0, Some(4)), 0);
        assert_eq!(page_count(4, Some(4)), 1);
        assert_eq!(page_count(5, Some(4)), 2);
        assert_eq!(page_count(5, None), 1);
        assert_eq!(page_count(0, None), 0);
    }

    #[test]
    fn local_create_and_delete_keep_page_count_current() {
        let mut board = EmployeeBoard::new(offline_client());
        board.apply_page(Page {
            items: (1..=4).map(|i| employee(&i.to_string(), "Ann")).collect(),
            total: 4,
            page: 1,
            limit: 4,
            total_pages: 1,
        });

        board.record_created(employee("5", "Bob"));
        assert_eq!(board.total(), 5);
        assert_eq!(board.total_pages(), 2);
        assert_eq!(board.employees()[0].id, "5");

        board.record_deleted("5");
        assert_eq!(board.total(), 4);
        assert_eq!(board.total_pages(), 1);

        for id in ["1", "2", "3", "4"] {
            board.record_deleted(id);
        }
        assert_eq!(board.total(), 0);
        assert_eq!(board.total_pages(), 0);
        assert!(board.employees().is_empty());
    }

    #[test]
    fn new_board_requests_first_page_of_four() {
        let board = EmployeeBoard::new(offline_client());
        assert_eq!(board.query().limit, Some(DEFAULT_PAGE_SIZE));
        assert_eq!(board.page(), 1);
        assert!(!board.can_manage());
    }

    #[tokio::test]
    async fn failed_fetch_raises_banner_and_keeps_list() {
        let mut board = EmployeeBoard::new(offline_client());
        board.apply_page(Page {
            items: vec![employee("1", "Ann")],
            total: 1,
            page: 1,
            limit: 4,
            total_pages: 1,
        });

        assert!(board.refresh().await.is_err());
        assert_eq!(board.banner().current(), Some("Failed to fetch employees"));
        assert_eq!(board.employees().len(), 1);

        board.dismiss_error();
        assert!(!board.banner().is_visible());
    }

    #[tokio::test]
    async fn failed_department_delete_keeps_row() {
        let mut board = DepartmentBoard::new(offline_client());
        assert!(board.delete("d1").await.is_err());
        assert_eq!(board.banner().current(), Some("Failed to delete department"));
    }
}
