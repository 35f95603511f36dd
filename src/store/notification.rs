//! Notifications sent to observers whenever the appointment store changes

use std::fmt::{Display, Error, Formatter};

use crate::appointment::AppointmentId;

/// A change that happened to an [`AppointmentStore`](crate::store::AppointmentStore)
///
/// Each event carries the message that should be shown to the user (e.g. as a toast notification).
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    /// An appointment has been added
    Scheduled{ id: AppointmentId },
    /// An appointment has been modified
    Updated{ id: AppointmentId },
    /// An appointment has been removed
    Cancelled{ id: AppointmentId },
}

impl StoreEvent {
    pub fn title(&self) -> &'static str {
        match self {
            StoreEvent::Scheduled{..} => "Appointment Scheduled",
            StoreEvent::Updated{..} => "Appointment Updated",
            StoreEvent::Cancelled{..} => "Appointment Cancelled",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StoreEvent::Scheduled{..} => "The appointment has been successfully added to the calendar.",
            StoreEvent::Updated{..} => "The appointment has been successfully updated.",
            StoreEvent::Cancelled{..} => "The appointment has been successfully removed from the calendar.",
        }
    }

    /// Whether this should be displayed as a destructive action
    pub fn is_destructive(&self) -> bool {
        match self {
            StoreEvent::Cancelled{..} => true,
            _ => false,
        }
    }

    /// The appointment this event is about
    pub fn appointment_id(&self) -> &AppointmentId {
        match self {
            StoreEvent::Scheduled{id} | StoreEvent::Updated{id} | StoreEvent::Cancelled{id} => id,
        }
    }
}

impl Display for StoreEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}: {}", self.title(), self.description())
    }
}



/// See [`notification_channel`]
pub type NotificationSender = tokio::sync::mpsc::UnboundedSender<StoreEvent>;
/// See [`notification_channel`]
pub type NotificationReceiver = tokio::sync::mpsc::UnboundedReceiver<StoreEvent>;

/// Create a notification channel, that can be used to be told about every change made to a store
///
/// Every event is queued until the receiver reads it, so that no toast is lost between two polls.
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let id = AppointmentId::from("1");
        let cancelled = StoreEvent::Cancelled{ id: id.clone() };
        assert_eq!(cancelled.title(), "Appointment Cancelled");
        assert!(cancelled.is_destructive());
        assert_eq!(cancelled.appointment_id(), &id);

        let scheduled = StoreEvent::Scheduled{ id };
        assert!(scheduled.is_destructive() == false);
        assert_eq!(scheduled.to_string(), "Appointment Scheduled: The appointment has been successfully added to the calendar.");
    }
}
