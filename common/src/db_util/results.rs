use super::*;

table! {
    results (event_id, player_id) {
        event_id -> Text,
        player_id -> Text,
        round_reached -> Text,
        updated_at -> Timestamptz,
    }
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = results)]
struct ResultPrivate {
    event_id: String,
    player_id: String,
    round_reached: String,
    updated_at: DateTime<Utc>,
}

fn private_to_public(p: ResultPrivate) -> Result<ResultRecord> {
    use conversions::*;
    Ok(ResultRecord {
        event_id: p.event_id,
        player_id: p.player_id,
        round_reached: deserialize_round(p.round_reached)?,
        updated_at: p.updated_at,
    })
}

/// Set the furthest round a player reached in an event, replacing any earlier result.
pub fn upsert_result(
    conn: &mut PgConnection,
    input_event_id: &str,
    input_player_id: &str,
    input_round: Round,
) -> Result<ResultRecord> {
    use self::results::dsl::*;

    let insert_row = ResultPrivate {
        event_id: input_event_id.to_string(),
        player_id: input_player_id.to_string(),
        round_reached: conversions::serialize_round(input_round),
        updated_at: Utc::now(),
    };

    let result = diesel::insert_into(results)
        .values(&insert_row)
        .on_conflict((event_id, player_id))
        .do_update()
        .set((
            round_reached.eq(excluded(round_reached)),
            updated_at.eq(excluded(updated_at)),
        ))
        .get_result::<ResultPrivate>(conn)
        .map_err(|e| anyhow!("{e}"))?;
    private_to_public(result)
}

pub fn get_results_for_events(
    conn: &mut PgConnection,
    input_event_ids: &[String],
) -> Result<Vec<ResultRecord>> {
    use self::results::dsl::*;

    let items_private: Vec<ResultPrivate> = results
        .filter(event_id.eq_any(input_event_ids))
        .load(conn)
        .map_err(|e| anyhow!("{e}"))?;

    items_private
        .into_iter()
        .map(private_to_public)
        .collect::<Result<Vec<ResultRecord>>>()
}
