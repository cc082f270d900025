//! Immutable per-event records.
//!
//! One row per ledger log, keyed `<tx_hash>-<log_index>`. Replaying a log
//! overwrites its record with identical content.

use serde::{Deserialize, Serialize};
use shared_types::{
    day_start, ApprovalEvent, BitInvalidatorUpdatedEvent, DomainChangedEvent, EpochIncreasedEvent,
    EventMeta, NonceIncreasedEvent, OrderCancelledEvent, OrderFilledEvent, OrderFilledRfqEvent,
    OwnershipTransferredEvent, PauseEvent, SwappedEvent, TransferEvent,
};
use si_01_entity_store::{Entity, EntityKind};

macro_rules! event_record {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $event:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub id: String,
            pub event: $event,
        }

        impl $name {
            pub fn new(meta: EventMeta, event: $event) -> Self {
                Self {
                    id: meta.record_id(),
                    event,
                }
            }
        }

        impl Entity for $name {
            const KIND: EntityKind = $kind;

            fn entity_id(&self) -> String {
                self.id.clone()
            }
        }
    };
}

event_record!(
    /// A token transfer as observed.
    TransferRecord,
    EntityKind::Transfer,
    TransferEvent
);
event_record!(ApprovalRecord, EntityKind::Approval, ApprovalEvent);
event_record!(OrderFilledRecord, EntityKind::OrderFilled, OrderFilledEvent);
event_record!(OrderCancelledRecord, EntityKind::OrderCancelled, OrderCancelledEvent);
event_record!(
    OwnershipTransferredRecord,
    EntityKind::OwnershipTransferred,
    OwnershipTransferredEvent
);
event_record!(PausedRecord, EntityKind::Paused, PauseEvent);
event_record!(UnpausedRecord, EntityKind::Unpaused, PauseEvent);
event_record!(
    BitInvalidatorUpdatedRecord,
    EntityKind::BitInvalidatorUpdated,
    BitInvalidatorUpdatedEvent
);
event_record!(EpochIncreasedRecord, EntityKind::EpochIncreased, EpochIncreasedEvent);
event_record!(DomainChangedRecord, EntityKind::DomainChanged, DomainChangedEvent);
event_record!(NonceIncreasedRecord, EntityKind::NonceIncreased, NonceIncreasedEvent);
event_record!(
    /// An RFQ fill on the limit order protocol.
    OrderFilledRfqRecord,
    EntityKind::OrderFilledRfq,
    OrderFilledRfqEvent
);

/// A router-reported swap, linked to the day bucket it was counted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwappedRecord {
    pub id: String,
    /// Id of the `DailyBucket` row.
    pub day: u64,
    pub event: SwappedEvent,
}

impl SwappedRecord {
    pub fn new(event: SwappedEvent) -> Self {
        Self {
            id: event.meta.record_id(),
            day: day_start(event.meta.timestamp),
            event,
        }
    }
}

impl Entity for SwappedRecord {
    const KIND: EntityKind = EntityKind::Swapped;

    fn entity_id(&self) -> String {
        self.id.clone()
    }
}
