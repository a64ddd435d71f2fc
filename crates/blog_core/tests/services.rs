use blog_core::db::open_db_in_memory;
use blog_core::{
    AuthorListQuery, AuthorService, CoreConfig, NewAuthor, NewPost, PostListQuery, PostPatch,
    PostService, RepoError, SqliteAuthorRepository, SqlitePostRepository, ValidationError,
};

#[test]
fn author_service_covers_the_author_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let ada = service
        .register("Ada", Some("5550001111".to_string()))
        .unwrap();
    let renamed = service.rename(ada.id, "Countess Ada").unwrap();
    assert_eq!(renamed.name, "Countess Ada");

    let cleared = service.set_phone_number(ada.id, None).unwrap();
    assert_eq!(cleared.phone_number, None);

    assert_eq!(
        service.list_authors(&AuthorListQuery::default()).unwrap(),
        vec![cleared.clone()]
    );

    service.remove_author(ada.id).unwrap();
    assert!(service.get_author(ada.id).unwrap().is_none());
}

#[test]
fn author_service_reports_first_violation_on_register() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let err = service.register("", Some("bad".to_string())).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingAuthorName)
    ));
}

#[test]
fn check_new_author_collects_every_violation_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());
    service.register("Ada", None).unwrap();

    let violations = service
        .check_new_author(&NewAuthor::new("Ada").with_phone_number("12"))
        .unwrap();
    assert_eq!(
        violations,
        vec![
            ValidationError::DuplicateAuthorName,
            ValidationError::InvalidPhoneNumber
        ]
    );

    let clean = service
        .check_new_author(&NewAuthor::new("Grace").with_phone_number("5550001111"))
        .unwrap();
    assert!(clean.is_empty());
    assert_eq!(
        service.list_authors(&AuthorListQuery::default()).unwrap().len(),
        1
    );
}

#[test]
fn post_service_covers_the_post_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let post = service
        .publish(&NewPost {
            title: "You Won't Believe These Numbers".to_string(),
            content: "n".repeat(300),
            category: "Non-Fiction".to_string(),
            summary: "Numbers.".to_string(),
        })
        .unwrap();

    let revised = service
        .revise(
            post.id,
            &PostPatch {
                content: Some("m".repeat(260)),
                ..PostPatch::default()
            },
        )
        .unwrap();
    assert_eq!(revised.content.len(), 260);

    assert_eq!(
        service.list_posts(&PostListQuery::default()).unwrap(),
        vec![revised]
    );

    service.remove_post(post.id).unwrap();
    assert!(service.get_post(post.id).unwrap().is_none());
}

#[test]
fn check_draft_uses_configured_rules() {
    let config = CoreConfig::from_json_str(
        r#"{ "post_rules": { "clickbait_markers": ["Shocking"], "max_summary_chars": 10 } }"#,
    )
    .unwrap();
    let conn = config.open_db().unwrap();
    let repo = SqlitePostRepository::with_rules(&conn, config.post_rules.clone()).unwrap();
    let service = PostService::new(repo);

    let draft = NewPost {
        title: "Top Picks".to_string(),
        content: "c".repeat(250),
        category: "Fiction".to_string(),
        summary: "far too long for ten".to_string(),
    };
    let violations = service.check_draft(&draft);
    assert_eq!(
        violations,
        vec![
            ValidationError::TitleNotClickbait,
            ValidationError::SummaryTooLong { max_chars: 10 }
        ]
    );
    assert_eq!(
        config.post_validator().collect_violations(&draft),
        violations
    );
}
