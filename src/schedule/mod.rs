//! Weekly schedule view-model
//!
//! A 7-day grid of 30-minute slots between 08:00 and 23:00, navigated one
//! week at a time. Weeks always begin on Monday. The view is a pure
//! projection over an already-fetched appointment list; it never mutates or
//! refetches data itself.

mod types;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime};

use crate::i18n::{self, Locale, MessageId};

pub use types::*;

/// First slot of the day
const DAY_START: (u32, u32) = (8, 0);

/// Exclusive end of the grid
const DAY_END: (u32, u32) = (23, 0);

/// Slot length in minutes
const SLOT_MINUTES: i64 = 30;

/// Resolved state of one (day, time) cell
#[derive(Debug, Clone, PartialEq)]
pub enum SlotStatus {
    Available,
    Booked(SlotDetail),
}

/// Display projection of a booked slot
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDetail {
    pub customer_name: String,
    pub customer_phone: String,
    pub service_name: String,
    pub worker_name: Option<String>,
    pub status: AppointmentStatus,
}

impl SlotDetail {
    fn of(appointment: &Appointment) -> Self {
        Self {
            customer_name: appointment.customer_name.clone(),
            customer_phone: appointment.customer_phone.clone(),
            service_name: appointment.service_name.clone(),
            worker_name: appointment.worker_name.clone(),
            status: appointment.status,
        }
    }
}

/// A clicked cell, driving the detail dialog
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedSlot {
    pub day: NaiveDate,
    pub time: NaiveTime,
    pub status: SlotStatus,
}

/// One legend row: a status, its color and its localized label
#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub status: AppointmentStatus,
    pub color: &'static str,
    pub label: &'static str,
}

/// Weekly schedule grid over a normalized appointment list
pub struct WeekView {
    appointments: Vec<Appointment>,
    locale: Locale,
    week_start: NaiveDate,
    selected: Option<SelectedSlot>,
    dialog_open: bool,
}

impl WeekView {
    /// Create a view anchored to the current real-world week
    pub fn new(appointments: Vec<Appointment>, locale: Locale) -> Self {
        Self::anchored(appointments, locale, Local::now().date_naive())
    }

    /// Create a view anchored to the week containing `date`
    pub fn anchored(appointments: Vec<Appointment>, locale: Locale, date: NaiveDate) -> Self {
        Self {
            appointments,
            locale,
            week_start: Self::week_start_of(date),
            selected: None,
            dialog_open: false,
        }
    }

    /// The Monday of the week containing `date`.
    ///
    /// Sunday rolls back six days; weeks never begin on Sunday.
    pub fn week_start_of(date: NaiveDate) -> NaiveDate {
        date - Duration::days(date.weekday().num_days_from_monday() as i64)
    }

    /// Monday of the currently displayed week
    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// Shift the displayed week back by seven days, without bound
    pub fn previous_week(&mut self) {
        self.week_start -= Duration::days(7);
    }

    /// Shift the displayed week forward by seven days, without bound
    pub fn next_week(&mut self) {
        self.week_start += Duration::days(7);
    }

    /// Re-anchor to the Monday of the current real-world week
    pub fn today(&mut self) {
        self.week_start = Self::week_start_of(Local::now().date_naive());
    }

    /// The seven days of the displayed week, Monday first
    pub fn days(&self) -> [NaiveDate; 7] {
        let mut days = [self.week_start; 7];
        for (offset, day) in days.iter_mut().enumerate() {
            *day = self.week_start + Duration::days(offset as i64);
        }
        days
    }

    /// The 30-minute slot times of one grid column, 08:00 through 22:30
    pub fn time_slots() -> Vec<NaiveTime> {
        let mut slots = Vec::new();
        let end = NaiveTime::from_hms_opt(DAY_END.0, DAY_END.1, 0).unwrap_or(NaiveTime::MIN);
        let mut current = NaiveTime::from_hms_opt(DAY_START.0, DAY_START.1, 0)
            .unwrap_or(NaiveTime::MIN);
        while current < end {
            slots.push(current);
            current += Duration::minutes(SLOT_MINUTES);
        }
        slots
    }

    /// Resolve one cell. The first matching appointment wins; use
    /// [`WeekView::appointments_at`] to see every booking in the slot.
    pub fn slot_status(&self, day: NaiveDate, time: NaiveTime) -> SlotStatus {
        match self
            .appointments
            .iter()
            .find(|a| a.date == day && a.time == time)
        {
            Some(appointment) => SlotStatus::Booked(SlotDetail::of(appointment)),
            None => SlotStatus::Available,
        }
    }

    /// Every appointment occupying the cell, in fetch order.
    ///
    /// The backend is expected to prevent double-booking; this exists so a
    /// conflict is visible to callers instead of silently masked by the
    /// first-match projection.
    pub fn appointments_at(&self, day: NaiveDate, time: NaiveTime) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.date == day && a.time == time)
            .collect()
    }

    /// Click a cell: resolve it, remember it and open the detail dialog
    pub fn select_slot(&mut self, day: NaiveDate, time: NaiveTime) -> SelectedSlot {
        let status = self.slot_status(day, time);
        let selected = SelectedSlot { day, time, status };
        self.selected = Some(selected.clone());
        self.dialog_open = true;
        selected
    }

    /// Close the detail dialog
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.selected = None;
    }

    /// The currently selected slot, if the dialog is open
    pub fn selected(&self) -> Option<&SelectedSlot> {
        self.selected.as_ref()
    }

    /// Whether the detail dialog is open
    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Whether `day` is the current real-world day, for the header highlight
    pub fn is_today(day: NaiveDate) -> bool {
        day == Local::now().date_naive()
    }

    /// Localized short day name for a header column
    pub fn day_label(&self, day: NaiveDate) -> &'static str {
        i18n::day_name(self.locale, day.weekday())
    }

    /// Localized label for an appointment status
    pub fn status_label(&self, status: AppointmentStatus) -> &'static str {
        let id = match status {
            AppointmentStatus::Confirmed => MessageId::StatusConfirmed,
            AppointmentStatus::Pending => MessageId::StatusPending,
            AppointmentStatus::Cancelled => MessageId::StatusCancelled,
        };
        i18n::text(self.locale, id)
    }

    /// Legend rows for the three statuses
    pub fn legend(&self) -> Vec<LegendEntry> {
        [
            AppointmentStatus::Confirmed,
            AppointmentStatus::Pending,
            AppointmentStatus::Cancelled,
        ]
        .into_iter()
        .map(|status| LegendEntry {
            status,
            color: status.color(),
            label: self.status_label(status),
        })
        .collect()
    }

    /// Replace the appointment list after a refetch, keeping the displayed week
    pub fn set_appointments(&mut self, appointments: Vec<Appointment>) {
        self.appointments = appointments;
    }

    /// Locale the view renders labels in
    pub fn locale(&self) -> Locale {
        self.locale
    }
}
