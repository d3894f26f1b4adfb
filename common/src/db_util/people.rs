use super::*;

table! {
    people (name) {
        name -> Text,
    }
}

pub fn get_all_people(conn: &mut PgConnection) -> Result<Vec<PersonRecord>> {
    use self::people::dsl::*;

    let names: Vec<String> = people
        .select(name)
        .order(name.asc())
        .load(conn)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(names
        .into_iter()
        .map(|n| PersonRecord { name: n })
        .collect())
}

pub fn insert_person(conn: &mut PgConnection, input_name: &str) -> Result<()> {
    use self::people::dsl::*;

    diesel::insert_into(people)
        .values(name.eq(input_name))
        .on_conflict_do_nothing()
        .execute(conn)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(())
}
