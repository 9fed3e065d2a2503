//! Multi-step booking selector
//!
//! Category, business, worker, service, then date and time, in that order.
//! Each upstream choice resets everything downstream of it; the options for
//! the next step are fetched only once the prior selection is made.

use chrono::{NaiveDate, NaiveTime};

use crate::api::{
    BookingConfirmation, BookingRequest, BookingsApi, Business, CatalogApi, Category, ServiceItem,
    Worker,
};
use crate::error::Error;

/// Pure selection state of the booking steps
#[derive(Debug, Default, Clone)]
pub struct BookingSelector {
    categories: Vec<Category>,
    businesses: Vec<Business>,
    workers: Vec<Worker>,
    services: Vec<ServiceItem>,

    category: Option<Category>,
    business: Option<Business>,
    worker: Option<Worker>,
    service: Option<ServiceItem>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
}

impl BookingSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a category, resetting every downstream step
    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
        self.business = None;
        self.worker = None;
        self.service = None;
        self.businesses.clear();
        self.workers.clear();
        self.services.clear();
    }

    /// Choose a business, resetting worker and service
    pub fn set_business(&mut self, business: Business) {
        self.business = Some(business);
        self.worker = None;
        self.service = None;
        self.workers.clear();
        self.services.clear();
    }

    /// Choose a worker, resetting the service
    pub fn set_worker(&mut self, worker: Worker) {
        self.worker = Some(worker);
        self.service = None;
        self.services.clear();
    }

    pub fn set_service(&mut self, service: ServiceItem) {
        self.service = Some(service);
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.time = Some(time);
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn set_businesses(&mut self, businesses: Vec<Business>) {
        self.businesses = businesses;
    }

    pub fn set_workers(&mut self, workers: Vec<Worker>) {
        self.workers = workers;
    }

    pub fn set_services(&mut self, services: Vec<ServiceItem>) {
        self.services = services;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn businesses(&self) -> &[Business] {
        &self.businesses
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn services(&self) -> &[ServiceItem] {
        &self.services
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn business(&self) -> Option<&Business> {
        self.business.as_ref()
    }

    pub fn worker(&self) -> Option<&Worker> {
        self.worker.as_ref()
    }

    pub fn service(&self) -> Option<&ServiceItem> {
        self.service.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Submission is allowed only with business, worker, service, date and
    /// time all chosen
    pub fn can_submit(&self) -> bool {
        self.business.is_some()
            && self.worker.is_some()
            && self.service.is_some()
            && self.date.is_some()
            && self.time.is_some()
    }

    /// Assemble the booking request, or `None` while any field is missing
    pub fn booking_request(&self, note: Option<String>) -> Option<BookingRequest> {
        Some(BookingRequest {
            business_id: self.business.as_ref()?.id.clone(),
            worker_id: self.worker.as_ref()?.id.clone(),
            service_id: self.service.as_ref()?.id.clone(),
            date: self.date?,
            time: self.time?.format("%H:%M").to_string(),
            note,
        })
    }
}

/// Async driver pairing the selector with the catalog and booking endpoints
pub struct BookingFlow {
    catalog: CatalogApi,
    bookings: BookingsApi,
    selector: BookingSelector,
}

impl BookingFlow {
    pub(crate) fn new(catalog: CatalogApi, bookings: BookingsApi) -> Self {
        Self {
            catalog,
            bookings,
            selector: BookingSelector::new(),
        }
    }

    pub fn selector(&self) -> &BookingSelector {
        &self.selector
    }

    /// Load the first dropdown
    pub async fn load_categories(&mut self) {
        let categories = degrade(self.catalog.categories().await, "categories");
        self.selector.set_categories(categories);
    }

    /// Choose a category and fetch its businesses
    pub async fn choose_category(&mut self, category: Category) {
        let id = category.id.clone();
        self.selector.set_category(category);
        let businesses = degrade(self.catalog.businesses(&id).await, "businesses");
        self.selector.set_businesses(businesses);
    }

    /// Choose a business and fetch its workers
    pub async fn choose_business(&mut self, business: Business) {
        let id = business.id.clone();
        self.selector.set_business(business);
        let workers = degrade(self.catalog.workers(&id).await, "workers");
        self.selector.set_workers(workers);
    }

    /// Choose a worker and fetch their services
    pub async fn choose_worker(&mut self, worker: Worker) {
        let id = worker.id.clone();
        self.selector.set_worker(worker);
        let services = degrade(self.catalog.services(&id).await, "services");
        self.selector.set_services(services);
    }

    pub fn choose_service(&mut self, service: ServiceItem) {
        self.selector.set_service(service);
    }

    pub fn choose_date(&mut self, date: NaiveDate) {
        self.selector.set_date(date);
    }

    pub fn choose_time(&mut self, time: NaiveTime) {
        self.selector.set_time(time);
    }

    /// Submit the booking. Refuses without a request when any step is
    /// incomplete; a backend failure surfaces as a single generic error.
    pub async fn submit(&self, note: Option<String>) -> Result<BookingConfirmation, Error> {
        let request = self
            .selector
            .booking_request(note)
            .ok_or_else(|| Error::validation("booking selection is incomplete"))?;
        self.bookings.create(&request).await
    }
}

/// A failed options fetch degrades to an empty list, logged only
fn degrade<T>(result: Result<Vec<T>, Error>, what: &str) -> Vec<T> {
    match result {
        Ok(options) => options,
        Err(error) => {
            log::warn!("failed to load {}: {}", what, error);
            Vec::new()
        }
    }
}
