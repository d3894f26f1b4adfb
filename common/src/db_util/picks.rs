use super::*;

table! {
    predictions (event_id, person_name) {
        event_id -> Text,
        person_name -> Text,
        player_id -> Text,
        updated_at -> Timestamptz,
    }
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = predictions)]
struct PickPrivate {
    event_id: String,
    person_name: String,
    player_id: String,
    updated_at: DateTime<Utc>,
}

fn private_to_public(p: PickPrivate) -> PickRecord {
    PickRecord {
        event_id: p.event_id,
        person: p.person_name,
        player_id: p.player_id,
        updated_at: p.updated_at,
    }
}

/// Set a person's pick for an event, replacing any earlier pick.
pub fn upsert_pick(
    conn: &mut PgConnection,
    input_event_id: &str,
    input_person: &str,
    input_player_id: &str,
) -> Result<PickRecord> {
    use self::predictions::dsl::*;

    let insert_row = PickPrivate {
        event_id: input_event_id.to_string(),
        person_name: input_person.to_string(),
        player_id: input_player_id.to_string(),
        updated_at: Utc::now(),
    };

    let result = diesel::insert_into(predictions)
        .values(&insert_row)
        .on_conflict((event_id, person_name))
        .do_update()
        .set((
            player_id.eq(excluded(player_id)),
            updated_at.eq(excluded(updated_at)),
        ))
        .get_result::<PickPrivate>(conn)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(private_to_public(result))
}

pub fn get_picks_for_events(
    conn: &mut PgConnection,
    input_event_ids: &[String],
) -> Result<Vec<PickRecord>> {
    use self::predictions::dsl::*;

    let items_private: Vec<PickPrivate> = predictions
        .filter(event_id.eq_any(input_event_ids))
        .order((event_id.asc(), person_name.asc()))
        .load(conn)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(items_private.into_iter().map(private_to_public).collect())
}
