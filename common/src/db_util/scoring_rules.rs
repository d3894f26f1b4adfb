use super::*;

table! {
    scoring_rules (round) {
        round -> Text,
        points -> Integer,
    }
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = scoring_rules)]
struct ScoringRulePrivate {
    round: String,
    points: i32,
}

fn private_to_public(p: ScoringRulePrivate) -> Result<ScoringRule> {
    use conversions::*;
    Ok(ScoringRule {
        round: deserialize_round(p.round)?,
        points: i32_to_u32(p.points)?,
    })
}

fn public_to_private(p: ScoringRule) -> Result<ScoringRulePrivate> {
    use conversions::*;
    Ok(ScoringRulePrivate {
        round: serialize_round(p.round),
        points: u32_to_i32(p.points)?,
    })
}

/// All rules, best round first.
pub fn get_all_scoring_rules(conn: &mut PgConnection) -> Result<Vec<ScoringRule>> {
    use self::scoring_rules::dsl::*;

    let items_private: Vec<ScoringRulePrivate> = scoring_rules
        .load(conn)
        .map_err(|e| anyhow!("{e}"))?;

    let mut rules = items_private
        .into_iter()
        .map(private_to_public)
        .collect::<Result<Vec<ScoringRule>>>()?;
    rules.sort_by_key(|r| r.round);
    Ok(rules)
}

pub fn upsert_scoring_rule(conn: &mut PgConnection, rule: ScoringRule) -> Result<()> {
    use self::scoring_rules::dsl::*;

    let insert_row = public_to_private(rule)?;

    diesel::insert_into(scoring_rules)
        .values(&insert_row)
        .on_conflict(round)
        .do_update()
        .set(points.eq(excluded(points)))
        .execute(conn)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(())
}

/// Delete the rule for a round. Returns whether a row was removed.
pub fn delete_scoring_rule(conn: &mut PgConnection, input_round: Round) -> Result<bool> {
    use self::scoring_rules::dsl::*;

    let input_round = conversions::serialize_round(input_round);

    let deleted = diesel::delete(scoring_rules.filter(round.eq(input_round)))
        .execute(conn)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(deleted > 0)
}
