//! Donation request domain entity and its status state machine

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::BloodGroup;
use crate::shared::DomainError;

/// Lifecycle stage of a donation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DonationStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Canceled,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "inprogress",
            Self::Done => "done",
            Self::Canceled => "canceled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }

    /// Edges of the strict transition graph. Staying in the same state is
    /// always allowed.
    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        use DonationStatus::*;
        if *self == next {
            return true;
        }
        match self {
            Pending => matches!(next, InProgress | Canceled),
            InProgress => matches!(next, Done | Canceled | Pending),
            Done | Canceled => false,
        }
    }

    /// Parse an optional list filter where `all` (or an empty value) means
    /// "no filter".
    pub fn parse_filter(raw: Option<&str>) -> Result<Option<Self>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl FromStr for DonationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(DomainError::Validation(format!(
                "Unknown donation status: '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How status changes are policed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,
    /// Only edges accepted by `DonationStatus::can_transition_to`.
    Strict,
}

impl TransitionPolicy {
    pub fn check(&self, from: DonationStatus, to: DonationStatus) -> Result<(), DomainError> {
        match self {
            Self::Permissive => Ok(()),
            Self::Strict if from.can_transition_to(to) => Ok(()),
            Self::Strict => Err(DomainError::Validation(format!(
                "Illegal status transition: {} -> {}",
                from, to
            ))),
        }
    }
}

/// A request for blood, owned by the user whose email is `requester_email`
#[derive(Debug, Clone, PartialEq)]
pub struct DonationRequest {
    pub id: String,
    pub requester_name: Option<String>,
    pub requester_email: String,
    pub recipient_name: String,
    pub recipient_district: Option<String>,
    pub recipient_upazila: Option<String>,
    pub hospital_name: Option<String>,
    pub full_address: Option<String>,
    pub blood_group: BloodGroup,
    pub donation_date: Option<NaiveDate>,
    pub donation_time: Option<String>,
    pub request_message: Option<String>,
    pub status: DonationStatus,
    /// Set when a donor takes the request (`inprogress`)
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DonationRequest {
    /// Build a new request. Status and creation time are always server-set.
    pub fn open(id: impl Into<String>, input: NewDonationRequest) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            requester_name: input.requester_name,
            requester_email: input.requester_email,
            recipient_name: input.recipient_name,
            recipient_district: input.recipient_district,
            recipient_upazila: input.recipient_upazila,
            hospital_name: input.hospital_name,
            full_address: input.full_address,
            blood_group: input.blood_group,
            donation_date: input.donation_date,
            donation_time: input.donation_time,
            request_message: input.request_message,
            status: DonationStatus::Pending,
            donor_name: None,
            donor_email: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a generic patch. Returns `true` when any field changed.
    ///
    /// The patch type carries no status, owner or donor fields, so those
    /// only move through `apply_status_change`.
    pub fn apply_patch(&mut self, patch: &DonationRequestPatch) -> bool {
        let before = self.clone();

        if let Some(v) = &patch.recipient_name {
            self.recipient_name = v.clone();
        }
        if let Some(v) = &patch.recipient_district {
            self.recipient_district = Some(v.clone());
        }
        if let Some(v) = &patch.recipient_upazila {
            self.recipient_upazila = Some(v.clone());
        }
        if let Some(v) = &patch.hospital_name {
            self.hospital_name = Some(v.clone());
        }
        if let Some(v) = &patch.full_address {
            self.full_address = Some(v.clone());
        }
        if let Some(v) = patch.blood_group {
            self.blood_group = v;
        }
        if let Some(v) = patch.donation_date {
            self.donation_date = Some(v);
        }
        if let Some(v) = &patch.donation_time {
            self.donation_time = Some(v.clone());
        }
        if let Some(v) = &patch.request_message {
            self.request_message = Some(v.clone());
        }

        self.touch_if_changed(&before)
    }

    /// Move to a new status. Entering `inprogress` stamps the donor fields;
    /// every other target leaves them untouched.
    pub fn apply_status_change(&mut self, change: &StatusChange) -> bool {
        let before = self.clone();

        self.status = change.status;
        if change.status == DonationStatus::InProgress {
            self.donor_name = change.donor_name.clone();
            self.donor_email = change.donor_email.clone();
        }

        self.touch_if_changed(&before)
    }

    fn touch_if_changed(&mut self, before: &DonationRequest) -> bool {
        let changed = self != before;
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

/// Creation input. No status or timestamps: those are server-authoritative.
#[derive(Debug, Clone)]
pub struct NewDonationRequest {
    pub requester_name: Option<String>,
    pub requester_email: String,
    pub recipient_name: String,
    pub recipient_district: Option<String>,
    pub recipient_upazila: Option<String>,
    pub hospital_name: Option<String>,
    pub full_address: Option<String>,
    pub blood_group: BloodGroup,
    pub donation_date: Option<NaiveDate>,
    pub donation_time: Option<String>,
    pub request_message: Option<String>,
}

/// Generic partial update of the request details
#[derive(Debug, Clone, Default)]
pub struct DonationRequestPatch {
    pub recipient_name: Option<String>,
    pub recipient_district: Option<String>,
    pub recipient_upazila: Option<String>,
    pub hospital_name: Option<String>,
    pub full_address: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub donation_date: Option<NaiveDate>,
    pub donation_time: Option<String>,
    pub request_message: Option<String>,
}

/// Dedicated status transition
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: DonationStatus,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
}

impl StatusChange {
    pub fn to(status: DonationStatus) -> Self {
        Self {
            status,
            donor_name: None,
            donor_email: None,
        }
    }
}

/// Equality filters for listing requests
#[derive(Debug, Clone, Default)]
pub struct DonationRequestFilter {
    pub requester_email: Option<String>,
    pub status: Option<DonationStatus>,
}

impl DonationRequestFilter {
    pub fn matches(&self, request: &DonationRequest) -> bool {
        self.requester_email
            .as_deref()
            .map_or(true, |e| request.requester_email == e)
            && self.status.map_or(true, |s| request.status == s)
    }
}

// ── Tests ──────────────────────────────────────────────────────
