use super::*;

table! {
    events (id) {
        id -> Text,
        short_id -> Text,
        name -> Text,
        level -> Text,
        year -> Integer,
        position -> Integer,
    }
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = events)]
struct EventPrivate {
    id: String,
    short_id: String,
    name: String,
    level: String,
    year: i32,
    position: i32,
}

fn private_to_public(p: EventPrivate) -> Result<EventRecord> {
    use conversions::*;
    Ok(EventRecord {
        event_id: p.id,
        short_id: p.short_id,
        name: p.name,
        category: deserialize_category(p.level)?,
        year: i32_to_u32(p.year)?,
    })
}

fn build_new_row(e: &EventRecord, position: usize) -> Result<EventPrivate> {
    use conversions::*;
    Ok(EventPrivate {
        id: e.event_id.clone(),
        short_id: e.short_id.clone(),
        name: e.name.clone(),
        level: serialize_category(e.category),
        year: u32_to_i32(e.year)?,
        position: usize_to_i32(position)?,
    })
}

/// Insert events, skipping ids that already exist. Returns the number inserted.
pub fn insert_events(conn: &mut PgConnection, input_events: &[EventRecord]) -> Result<usize> {
    use self::events::dsl::*;

    let insert_rows = input_events
        .iter()
        .enumerate()
        .map(|(i, e)| build_new_row(e, i))
        .collect::<Result<Vec<EventPrivate>>>()?;

    diesel::insert_into(events)
        .values(&insert_rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .map_err(|e| anyhow!("{e}"))
}

pub fn get_events_by_year(conn: &mut PgConnection, input_year: u32) -> Result<Vec<EventRecord>> {
    use self::events::dsl::*;

    let input_year = conversions::u32_to_i32(input_year)?;

    let items_private: Vec<EventPrivate> = events
        .filter(year.eq(input_year))
        .order((position.asc(), id.asc()))
        .load(conn)
        .map_err(|e| anyhow!("{e}"))?;

    items_private
        .into_iter()
        .map(private_to_public)
        .collect::<Result<Vec<EventRecord>>>()
}

pub fn get_event_ids_by_year(conn: &mut PgConnection, input_year: u32) -> Result<Vec<String>> {
    use self::events::dsl::*;

    let input_year = conversions::u32_to_i32(input_year)?;

    events
        .filter(year.eq(input_year))
        .select(id)
        .load(conn)
        .map_err(|e| anyhow!("{e}"))
}

pub fn get_event_by_id(conn: &mut PgConnection, row_id: &str) -> Result<Option<EventRecord>> {
    use self::events::dsl::*;

    events
        .filter(id.eq(row_id))
        .first::<EventPrivate>(conn)
        .optional()
        .map_err(|e| anyhow!("{e}"))?
        .map(private_to_public)
        .transpose()
}
