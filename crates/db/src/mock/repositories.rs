use chrono::{NaiveDateTime, NaiveTime};
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbDateTimeslot, DbEvent, DbEventDateAvailability, DbEventWeekdayAvailability,
    DbParticipant, DbSelfDateAvailability, DbSelfWeekdayAvailability, DbUrlCode,
    DbWeekdayTimeslot,
};

// Mock repositories for testing
mock! {
    pub EventRepo {
        pub async fn create_event(
            &self,
            actor_id: Uuid,
            title: &'static str,
            grid_kind: &'static str,
            duration: Option<i16>,
            time_zone: &'static str,
        ) -> eyre::Result<DbEvent>;

        pub async fn find_event_by_code(
            &self,
            code: &'static str,
        ) -> eyre::Result<Option<DbEvent>>;

        pub async fn update_event(
            &self,
            id: Uuid,
            title: &'static str,
            duration: Option<i16>,
            time_zone: &'static str,
        ) -> eyre::Result<()>;

        pub async fn find_url_code(
            &self,
            code: &'static str,
        ) -> eyre::Result<Option<DbUrlCode>>;

        pub async fn create_url_code(
            &self,
            code: &'static str,
            event_id: Uuid,
        ) -> eyre::Result<DbUrlCode>;
    }
}

mock! {
    pub TimeslotRepo {
        pub async fn insert_date_slots(
            &self,
            event_id: Uuid,
            slots: Vec<NaiveDateTime>,
        ) -> eyre::Result<()>;

        pub async fn insert_weekday_slots(
            &self,
            event_id: Uuid,
            slots: Vec<(i16, NaiveTime)>,
        ) -> eyre::Result<()>;

        pub async fn get_date_slots(
            &self,
            event_id: Uuid,
        ) -> eyre::Result<Vec<DbDateTimeslot>>;

        pub async fn get_weekday_slots(
            &self,
            event_id: Uuid,
        ) -> eyre::Result<Vec<DbWeekdayTimeslot>>;

        pub async fn delete_date_slots(
            &self,
            event_id: Uuid,
            slots: Vec<NaiveDateTime>,
        ) -> eyre::Result<()>;

        pub async fn delete_weekday_slots(
            &self,
            event_id: Uuid,
            slots: Vec<(i16, NaiveTime)>,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub ParticipantRepo {
        pub async fn find_participant(
            &self,
            event_id: Uuid,
            actor_id: Uuid,
        ) -> eyre::Result<Option<DbParticipant>>;

        pub async fn find_participant_by_name(
            &self,
            event_id: Uuid,
            display_name: &'static str,
        ) -> eyre::Result<Option<DbParticipant>>;

        pub async fn upsert_participant(
            &self,
            event_id: Uuid,
            actor_id: Uuid,
            display_name: &'static str,
            time_zone: &'static str,
        ) -> eyre::Result<(DbParticipant, bool)>;

        pub async fn get_participants(
            &self,
            event_id: Uuid,
        ) -> eyre::Result<Vec<DbParticipant>>;

        pub async fn delete_participant(&self, id: Uuid) -> eyre::Result<()>;
    }
}

mock! {
    pub AvailabilityRepo {
        pub async fn delete_date_availability(
            &self,
            participant_id: Uuid,
        ) -> eyre::Result<()>;

        pub async fn delete_weekday_availability(
            &self,
            participant_id: Uuid,
        ) -> eyre::Result<()>;

        pub async fn insert_date_availability(
            &self,
            participant_id: Uuid,
            rows: Vec<(Uuid, bool)>,
        ) -> eyre::Result<()>;

        pub async fn insert_weekday_availability(
            &self,
            participant_id: Uuid,
            rows: Vec<(Uuid, bool)>,
        ) -> eyre::Result<()>;

        pub async fn get_self_date_availability(
            &self,
            participant_id: Uuid,
        ) -> eyre::Result<Vec<DbSelfDateAvailability>>;

        pub async fn get_self_weekday_availability(
            &self,
            participant_id: Uuid,
        ) -> eyre::Result<Vec<DbSelfWeekdayAvailability>>;

        pub async fn get_event_date_availability(
            &self,
            event_id: Uuid,
        ) -> eyre::Result<Vec<DbEventDateAvailability>>;

        pub async fn get_event_weekday_availability(
            &self,
            event_id: Uuid,
        ) -> eyre::Result<Vec<DbEventWeekdayAvailability>>;
    }
}
