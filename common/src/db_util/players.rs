use super::*;

table! {
    players (id) {
        id -> Text,
        name -> Text,
    }
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = players)]
struct PlayerPrivate {
    id: String,
    name: String,
}

fn private_to_public(p: PlayerPrivate) -> PlayerRecord {
    PlayerRecord {
        player_id: p.id,
        name: p.name,
    }
}

pub fn get_all_players(conn: &mut PgConnection) -> Result<Vec<PlayerRecord>> {
    use self::players::dsl::*;

    let items_private: Vec<PlayerPrivate> = players
        .order(name.asc())
        .load(conn)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(items_private.into_iter().map(private_to_public).collect())
}

/// Register a player. The display name of an existing player is kept.
pub fn insert_player(conn: &mut PgConnection, player: &PlayerRecord) -> Result<()> {
    use self::players::dsl::*;

    let insert_row = PlayerPrivate {
        id: player.player_id.clone(),
        name: player.name.clone(),
    };

    diesel::insert_into(players)
        .values(&insert_row)
        .on_conflict_do_nothing()
        .execute(conn)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(())
}
