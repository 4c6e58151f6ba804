use chrono::{DateTime, Duration, FixedOffset, SubsecRound, Utc};
use sea_orm::ActiveValue::{self, NotSet, Set, Unchanged};
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

/// The user performing a write. Only the id is stored on rows
/// (`created_by` / `modified_by`); the user record lives elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
}

impl Actor {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    pub fn id(&self) -> Option<Uuid> {
        Some(self.user_id)
    }
}

/// Next `modified_on` value: the current time at microsecond precision, bumped
/// past `previous` so the column strictly increases even on a coarse clock.
pub fn next_modified_on(
    previous: Option<DateTimeWithTimeZone>,
    now: DateTime<Utc>,
) -> DateTimeWithTimeZone {
    let candidate: DateTime<FixedOffset> = now.trunc_subsecs(6).into();
    match previous {
        Some(prev) if candidate <= prev => prev + Duration::microseconds(1),
        _ => candidate,
    }
}

/// Stamps the audit timestamps of an active model about to be saved.
///
/// `created_on` is written on insert only; on update it is dropped from the
/// statement so it can never change.
pub fn stamp_timestamps(
    created_on: &mut ActiveValue<DateTimeWithTimeZone>,
    modified_on: &mut ActiveValue<DateTimeWithTimeZone>,
    insert: bool,
) {
    let previous = match modified_on {
        Set(v) | Unchanged(v) => Some(*v),
        NotSet => None,
    };
    let now = next_modified_on(previous, Utc::now());

    if insert {
        *created_on = Set(now);
    } else if created_on.is_set() {
        *created_on = NotSet;
    }
    *modified_on = Set(now);
}

/// Implements `ActiveModelBehavior` for an entity module whose `ActiveModel`
/// carries `created_on` and `modified_on`.
macro_rules! impl_audited_behavior {
    () => {
        #[::async_trait::async_trait]
        impl ::sea_orm::ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(
                mut self,
                _db: &C,
                insert: bool,
            ) -> ::std::result::Result<Self, ::sea_orm::DbErr>
            where
                C: ::sea_orm::ConnectionTrait,
            {
                $crate::audit::stamp_timestamps(&mut self.created_on, &mut self.modified_on, insert);
                Ok(self)
            }
        }
    };
}

pub(crate) use impl_audited_behavior;

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(micros: i64) -> DateTime<Utc> {
        Utc.timestamp_micros(1_700_000_000_000_000 + micros).unwrap()
    }

    #[test]
    fn first_stamp_uses_the_clock() {
        let now = at(10);
        assert_eq!(next_modified_on(None, now), now.fixed_offset());
    }

    #[test]
    fn stamp_is_bumped_past_a_previous_value_from_the_same_tick() {
        let prev: DateTimeWithTimeZone = at(10).into();
        let next = next_modified_on(Some(prev), at(10));
        assert!(next > prev);
        assert_eq!(next - prev, Duration::microseconds(1));
    }

    #[test]
    fn stamp_is_bumped_when_the_clock_went_backwards() {
        let prev: DateTimeWithTimeZone = at(500).into();
        assert!(next_modified_on(Some(prev), at(20)) > prev);
    }

    #[test]
    fn nanoseconds_are_truncated() {
        let now = at(0) + Duration::nanoseconds(789);
        assert_eq!(next_modified_on(None, now), at(0).fixed_offset());
    }

    #[test]
    fn update_never_rewrites_created_on() {
        let created: DateTimeWithTimeZone = at(1).into();
        let mut created_on = Set(created);
        let mut modified_on = Unchanged(created);
        stamp_timestamps(&mut created_on, &mut modified_on, false);
        assert!(matches!(created_on, NotSet));
        match modified_on {
            Set(v) => assert!(v > created),
            other => panic!("modified_on not set: {other:?}"),
        }
    }

    #[test]
    fn insert_sets_both_timestamps() {
        let mut created_on = NotSet;
        let mut modified_on = NotSet;
        stamp_timestamps(&mut created_on, &mut modified_on, true);
        assert!(created_on.is_set());
        assert!(modified_on.is_set());
    }
}
