use std::collections::BTreeSet;

use member_search::domain::member::{MemberTeam, MemberUpdate, NewMember};
use member_search::domain::search::{
    MemberOrder, MemberPredicate, MemberSearchCondition, MemberSortField,
};
use member_search::domain::types::{MemberId, TeamName, Username};
use member_search::pagination::{PageRequest, PageStrategy, TotalSource};
use member_search::repository::{
    DieselRepository, MemberReader, MemberSearchQuery, MemberWriter, TeamReader,
};
use member_search::services::seed::seed_sample_data;

mod common;

fn usernames(rows: &[MemberTeam]) -> Vec<Option<&str>> {
    rows.iter().map(|row| row.username.as_deref()).collect()
}

fn ids(repo: &DieselRepository, condition: MemberSearchCondition) -> BTreeSet<i32> {
    repo.search_members(MemberSearchQuery::new(condition))
        .expect("search")
        .into_iter()
        .map(|row| row.member_id.get())
        .collect()
}

fn team_name(name: &str) -> TeamName {
    TeamName::new(name).expect("valid team name")
}

#[test]
fn test_team_b_older_than_35_is_member4() {
    let test_db = common::TestDb::new("test_team_b_older_than_35.db");
    let repo = test_db.repo();
    let (_, team_b) = common::seed_four_members(&repo);

    let condition = MemberSearchCondition::new()
        .team_name(team_name("teamB"))
        .age_goe(35);
    let rows = repo
        .search_members(MemberSearchQuery::new(condition))
        .expect("search");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username.as_deref(), Some("member4"));
    assert_eq!(rows[0].age, 40);
    assert_eq!(rows[0].team_id, Some(team_b.id));
    assert_eq!(rows[0].team_name.as_deref(), Some("teamB"));
}

#[test]
fn test_empty_condition_returns_everyone_in_id_order() {
    let test_db = common::TestDb::new("test_empty_condition.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);

    let rows = repo
        .search_members(MemberSearchQuery::default())
        .expect("search");

    assert_eq!(
        usernames(&rows),
        vec![
            Some("member1"),
            Some("member2"),
            Some("member3"),
            Some("member4")
        ]
    );
    assert_eq!(
        repo.count_members(&MemberSearchCondition::new())
            .expect("count"),
        4
    );
}

#[test]
fn test_combined_filters_equal_intersection_of_single_filters() {
    let test_db = common::TestDb::new("test_intersection.db");
    let repo = test_db.repo();
    seed_sample_data(&repo).expect("seed");

    let username = Username::new("member42").expect("valid username");
    let singles = [
        MemberSearchCondition::new().username(username.clone()),
        MemberSearchCondition::new().team_name(team_name("teamA")),
        MemberSearchCondition::new().age_goe(30),
        MemberSearchCondition::new().age_loe(60),
    ];
    let single_ids: Vec<BTreeSet<i32>> = singles
        .iter()
        .map(|condition| ids(&repo, condition.clone()))
        .collect();

    // Every non-empty subset of the four filters.
    for mask in 1u8..16 {
        let mut condition = MemberSearchCondition::new();
        let mut expected: Option<BTreeSet<i32>> = None;
        for (bit, single) in singles.iter().enumerate() {
            if mask & (1 << bit) == 0 {
                continue;
            }
            condition = MemberSearchCondition {
                username: single.username.clone().or(condition.username),
                team_name: single.team_name.clone().or(condition.team_name),
                age_goe: single.age_goe.or(condition.age_goe),
                age_loe: single.age_loe.or(condition.age_loe),
            };
            expected = Some(match expected {
                Some(acc) => acc.intersection(&single_ids[bit]).copied().collect(),
                None => single_ids[bit].clone(),
            });
        }

        assert_eq!(
            ids(&repo, condition.clone()),
            expected.expect("non-empty subset"),
            "mask {mask:04b}"
        );
        assert_eq!(
            repo.count_members(&condition).expect("count"),
            ids(&repo, condition).len()
        );
    }
}

#[test]
fn test_member_without_team_has_null_team_fields() {
    let test_db = common::TestDb::new("test_member_without_team.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);

    let loner = repo
        .create_member(&NewMember::try_new(Some("loner"), 50, None).expect("valid member"))
        .expect("create member");

    let rows = repo
        .search_members(MemberSearchQuery::new(
            MemberSearchCondition::new().username(Username::new("loner").expect("valid")),
        ))
        .expect("search");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].member_id, loner.id);
    assert_eq!(rows[0].team_id, None);
    assert_eq!(rows[0].team_name, None);

    // A team filter never matches a member without a team.
    let team_rows = repo
        .search_members(MemberSearchQuery::new(
            MemberSearchCondition::new().age_goe(45).team_name(team_name("teamA")),
        ))
        .expect("search");
    assert!(team_rows.is_empty());
}

#[test]
fn test_nullable_sort_keys_place_nulls_last() {
    let test_db = common::TestDb::new("test_nulls_last.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);
    repo.create_member(&NewMember::try_new(None, 5, None).expect("valid member"))
        .expect("create member");

    for order in [
        MemberOrder::asc(MemberSortField::Username),
        MemberOrder::desc(MemberSortField::Username),
    ] {
        let rows = repo
            .search_members(MemberSearchQuery::default().order_by(order))
            .expect("search");
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].username, None, "{order:?}");
    }

    let rows = repo
        .search_members(
            MemberSearchQuery::default().order_by(MemberOrder::desc(MemberSortField::TeamName)),
        )
        .expect("search");
    assert_eq!(
        usernames(&rows),
        vec![
            Some("member3"),
            Some("member4"),
            Some("member1"),
            Some("member2"),
            None
        ]
    );
}

#[test]
fn test_multi_key_ordering() {
    let test_db = common::TestDb::new("test_multi_key_ordering.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);

    let rows = repo
        .search_members(MemberSearchQuery::default().order_by_all([
            MemberOrder::asc(MemberSortField::TeamName),
            MemberOrder::desc(MemberSortField::Age),
        ]))
        .expect("search");

    assert_eq!(
        usernames(&rows),
        vec![
            Some("member2"),
            Some("member1"),
            Some("member4"),
            Some("member3")
        ]
    );
}

#[test]
fn test_or_composed_filter() {
    let test_db = common::TestDb::new("test_or_composed_filter.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);

    let either = MemberPredicate::AgeLoe(10).or(MemberPredicate::AgeGoe(40));
    let rows = repo
        .search_members(MemberSearchQuery::default().matching(either))
        .expect("search");
    assert_eq!(usernames(&rows), vec![Some("member1"), Some("member4")]);

    let nothing = repo
        .search_members(MemberSearchQuery::default().matching(MemberPredicate::Any(Vec::new())))
        .expect("search");
    assert!(nothing.is_empty());

    let within_team = MemberSearchQuery::new(
        MemberSearchCondition::new().team_name(team_name("teamA")),
    )
    .matching(MemberPredicate::AgeGoe(15).or(MemberPredicate::AgeGoe(100)));
    let rows = repo.search_members(within_team).expect("search");
    assert_eq!(usernames(&rows), vec![Some("member2")]);
}

#[test]
fn test_page_strategies_agree_on_content_and_total() {
    let test_db = common::TestDb::new("test_page_strategies.db");
    let repo = test_db.repo();
    seed_sample_data(&repo).expect("seed");

    let query =
        MemberSearchQuery::new(MemberSearchCondition::new().team_name(team_name("teamA")));

    for page in [PageRequest::new(0, 20), PageRequest::new(1, 20), PageRequest::new(2, 20)] {
        let naive = repo
            .search_members_page(query.clone(), page, PageStrategy::Naive)
            .expect("naive page");
        let split = repo
            .search_members_page(query.clone(), page, PageStrategy::Split)
            .expect("split page");
        let optimized = repo
            .search_members_page(query.clone(), page, PageStrategy::Optimized)
            .expect("optimized page");

        assert_eq!(naive.content, split.content);
        assert_eq!(split.content, optimized.content);
        assert_eq!(naive.total_elements, 50);
        assert_eq!(split.total_elements, 50);
        assert_eq!(optimized.total_elements, 50);
        assert!(naive.content.len() <= page.size);
        assert!(page.offset() + naive.content.len() <= naive.total_elements);
    }

    let last = repo
        .search_members_page(query, PageRequest::new(2, 20), PageStrategy::Split)
        .expect("last page");
    assert_eq!(last.content.len(), 10);
    assert_eq!(last.total_pages(), 3);
    assert!(last.is_last());
    assert_eq!(last.content[0].username.as_deref(), Some("member80"));
}

#[test]
fn test_optimized_strategy_skips_count_when_page_is_conclusive() {
    let test_db = common::TestDb::new("test_optimized_strategy.db");
    let repo = test_db.repo();
    seed_sample_data(&repo).expect("seed");

    let few = MemberSearchQuery::new(MemberSearchCondition::new().age_goe(95));
    let page = repo
        .search_members_page(few, PageRequest::new(0, 20), PageStrategy::Optimized)
        .expect("page");
    assert_eq!(page.content.len(), 5);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_source, TotalSource::Inferred);

    let everyone = MemberSearchQuery::default();
    let full = repo
        .search_members_page(everyone.clone(), PageRequest::new(0, 20), PageStrategy::Optimized)
        .expect("page");
    assert_eq!(full.total_elements, 100);
    assert_eq!(full.total_source, TotalSource::Counted);

    let tail = repo
        .search_members_page(everyone.clone(), PageRequest::new(3, 30), PageStrategy::Optimized)
        .expect("page");
    assert_eq!(tail.content.len(), 10);
    assert_eq!(tail.total_elements, 100);
    assert_eq!(tail.total_source, TotalSource::Inferred);

    let past_end = repo
        .search_members_page(everyone, PageRequest::new(10, 20), PageStrategy::Optimized)
        .expect("page");
    assert!(past_end.content.is_empty());
    assert_eq!(past_end.total_elements, 100);
    assert_eq!(past_end.total_source, TotalSource::Counted);
}

#[test]
fn test_pages_past_the_end_are_empty_for_every_strategy() {
    let test_db = common::TestDb::new("test_pages_past_the_end.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);

    let requests = [
        PageRequest::new(3, 2),
        PageRequest::new(100_000_000_000_000_000, 100),
        PageRequest::new(usize::MAX, 20),
    ];

    for page in requests {
        for strategy in [PageStrategy::Naive, PageStrategy::Split, PageStrategy::Optimized] {
            let result = repo
                .search_members_page(MemberSearchQuery::default(), page, strategy)
                .expect("page past the end");

            assert!(result.content.is_empty(), "{page:?} {strategy:?}");
            assert_eq!(result.total_elements, 4, "{page:?} {strategy:?}");
            assert_eq!(result.total_source, TotalSource::Counted, "{page:?} {strategy:?}");
            assert!(result.is_last(), "{page:?} {strategy:?}");
        }
    }
}

#[test]
fn test_naive_and_split_always_count() {
    let test_db = common::TestDb::new("test_naive_split_count.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);

    for strategy in [PageStrategy::Naive, PageStrategy::Split] {
        let page = repo
            .search_members_page(MemberSearchQuery::default(), PageRequest::new(0, 20), strategy)
            .expect("page");
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_source, TotalSource::Counted);
    }
}

#[test]
fn test_bulk_update_is_visible_to_later_reads() {
    let test_db = common::TestDb::new("test_bulk_update.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);

    let team_a = MemberSearchCondition::new().team_name(team_name("teamA"));
    assert_eq!(
        repo.update_members(&team_a, &MemberUpdate::AddAge(1))
            .expect("add age"),
        2
    );

    let older = MemberSearchCondition::new().age_goe(30);
    assert_eq!(
        repo.update_members(&older, &MemberUpdate::MultiplyAge(2))
            .expect("multiply age"),
        2
    );

    let renamed = Username::new("veteran").expect("valid username");
    assert_eq!(
        repo.update_members(
            &MemberSearchCondition::new().age_goe(70),
            &MemberUpdate::Rename(renamed.clone())
        )
        .expect("rename"),
        1
    );

    let ages: Vec<i32> = repo
        .search_members(MemberSearchQuery::default())
        .expect("search")
        .into_iter()
        .map(|row| row.age)
        .collect();
    assert_eq!(ages, vec![11, 21, 60, 80]);

    let veterans = repo.list_members_by_username(&renamed).expect("list");
    assert_eq!(veterans.len(), 1);
    assert_eq!(veterans[0].age, 80);

    assert_eq!(
        repo.update_members(
            &MemberSearchCondition::new().age_goe(150),
            &MemberUpdate::AddAge(1)
        )
        .expect("no-op update"),
        0
    );
}

#[test]
fn test_bulk_delete_removes_matching_members() {
    let test_db = common::TestDb::new("test_bulk_delete.db");
    let repo = test_db.repo();
    common::seed_four_members(&repo);

    let team_b = MemberSearchCondition::new().team_name(team_name("teamB"));
    assert_eq!(repo.delete_members(&team_b).expect("delete"), 2);
    assert_eq!(repo.count_members(&team_b).expect("count"), 0);
    assert_eq!(
        repo.count_members(&MemberSearchCondition::new())
            .expect("count"),
        2
    );
    assert_eq!(repo.delete_members(&team_b).expect("delete again"), 0);
}

#[test]
fn test_lookups_by_id_and_name() {
    let test_db = common::TestDb::new("test_lookups.db");
    let repo = test_db.repo();
    let (team_a, _) = common::seed_four_members(&repo);

    let member = repo
        .get_member_by_id(MemberId::new(1).expect("valid id"))
        .expect("lookup")
        .expect("member exists");
    assert_eq!(member.username.as_deref(), Some("member1"));
    assert_eq!(member.team_id, Some(team_a.id));

    assert!(
        repo.get_member_by_id(MemberId::new(999).expect("valid id"))
            .expect("lookup")
            .is_none()
    );

    let team = repo
        .get_team_by_name(&team_name("teamA"))
        .expect("lookup")
        .expect("team exists");
    assert_eq!(team, team_a);
    assert!(
        repo.get_team_by_name(&team_name("teamC"))
            .expect("lookup")
            .is_none()
    );

    let teams = repo.list_teams().expect("list teams");
    assert_eq!(teams.len(), 2);
}

#[test]
fn test_seed_runs_only_on_empty_database() {
    let test_db = common::TestDb::new("test_seed_once.db");
    let repo = test_db.repo();

    assert_eq!(seed_sample_data(&repo).expect("seed"), 100);
    assert_eq!(seed_sample_data(&repo).expect("seed again"), 0);
    assert_eq!(
        repo.count_members(&MemberSearchCondition::new())
            .expect("count"),
        100
    );

    let member7 = repo
        .list_members_by_username(&Username::new("member7").expect("valid"))
        .expect("list");
    assert_eq!(member7[0].age, 7);
}
