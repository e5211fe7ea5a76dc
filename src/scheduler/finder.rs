use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::RepositoryError;
use crate::model::time_card::TimeCard;
use crate::repository::{AttendanceRepository, StaffRepository};

/// Open time cards for `work_date` whose owner is on `store_id`'s roster.
///
/// The attendance table has no store column, so the query is store-wide and
/// the roster filter runs here.
pub async fn find_open_shifts(
    staff: &dyn StaffRepository,
    attendance: &dyn AttendanceRepository,
    store_id: &str,
    work_date: NaiveDate,
) -> Result<Vec<TimeCard>, RepositoryError> {
    let roster: HashSet<String> = staff.list_staff_ids(store_id).await?.into_iter().collect();
    if roster.is_empty() {
        return Ok(Vec::new());
    }

    let open = attendance.query_open(work_date).await?;
    Ok(open
        .into_iter()
        .filter(|card| card.is_open() && roster.contains(&card.staff_id))
        .collect())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::repository::memory::{InMemoryStaff, InMemoryTimeCards};
    use chrono::{TimeZone, Utc};

    pub(crate) fn open_card(id: &str, staff_id: &str, work_date: NaiveDate) -> TimeCard {
        TimeCard {
            id: id.into(),
            staff_id: staff_id.into(),
            work_date,
            clock_in: Utc.from_utc_datetime(&work_date.and_hms_opt(11, 0, 0).unwrap()),
            clock_out: None,
            scheduled_end_time: None,
            forgot_clockout: false,
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[actix_web::test]
    async fn keeps_only_open_cards_on_the_roster_for_the_date() {
        let staff = InMemoryStaff::default()
            .with_roster("store-x", &["a", "b"])
            .with_roster("store-y", &["c"]);
        let mut closed = open_card("tc-closed", "b", date(9));
        closed.clock_out = Some(Utc::now());
        let attendance = InMemoryTimeCards::new(vec![
            open_card("tc-a", "a", date(9)),
            closed,
            open_card("tc-c", "c", date(9)),
            open_card("tc-a-older", "a", date(8)),
        ]);

        let found = find_open_shifts(&staff, &attendance, "store-x", date(9))
            .await
            .unwrap();

        let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["tc-a"]);
    }

    #[actix_web::test]
    async fn empty_roster_returns_nothing_without_querying() {
        let staff = InMemoryStaff::default();
        let attendance = InMemoryTimeCards::new(vec![open_card("tc-a", "a", date(9))]);

        let found = find_open_shifts(&staff, &attendance, "store-x", date(9))
            .await
            .unwrap();

        assert!(found.is_empty());
        assert_eq!(attendance.query_count(), 0);
    }

    #[actix_web::test]
    async fn roster_failure_is_returned() {
        let staff = InMemoryStaff::default().failing_for("store-x");
        let attendance = InMemoryTimeCards::default();

        let result = find_open_shifts(&staff, &attendance, "store-x", date(9)).await;
        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }
}
