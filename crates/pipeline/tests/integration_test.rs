//! Integration tests for the aggregation engine.
//!
//! These tests load a realistic CSV excerpt through the data loader and check
//! that every view agrees with the others.

use data_loader::{parse_csv, MovieCatalog, MovieRecord};
use pipeline::{
    aggregate_by_studio, aggregate_by_year, analyze_intervals, movies_by_year, query_movies,
    top_studios, MovieQuery, ProducerInterval, StudioWinCount,
};
use std::collections::HashSet;

const MOVIELIST: &str = "year;title;studios;producers;winner
1980;Can't Stop the Music;Associated Film Distribution;Allan Carr;yes
1980;Cruising;Lorimar Productions, United Artists;Jerry Weintraub;
1980;The Formula;MGM, United Artists;Steve Shagan;
1981;Mommie Dearest;Paramount Pictures;Frank Yablans;yes
1981;Heaven's Gate;United Artists;Joann Carelli;
1984;Bolero;Cannon Films;Bo Derek;yes
1986;Howard the Duck;Universal Studios;Gloria Katz;yes
1986;Under the Cherry Moon;Warner Bros.;Bob Cavallo, Joe Ruffalo and Steve Fargnoli;yes
1990;The Adventures of Ford Fairlane;20th Century Fox;Steven Perry and Joel Silver;yes
1990;Ghosts Can't Do It;Triumph Releasing;Bo Derek;yes
2002;Swept Away;Screen Gems;Matthew Vaughn;yes
2015;Fantastic Four;20th Century Fox;Simon Kinberg, Matthew Vaughn, Hutch Parker, Robert Kulzer and Gregory Goodman;yes
2015;Fifty Shades of Grey;Universal Pictures, Focus Features;Michael De Luca, Dana Brunetti and E. L. James;yes
";

fn create_test_catalog() -> MovieCatalog {
    let records = parse_csv(MOVIELIST).expect("sample CSV parses");
    MovieCatalog::from_records(records).expect("sample ids are unique")
}

fn record(year: i32, title: &str, studios: &str, producers: &str, winner: bool) -> MovieRecord {
    MovieRecord {
        id: 0,
        year,
        title: title.to_string(),
        studios: studios.to_string(),
        producers: producers.to_string(),
        winner,
    }
}

#[test]
fn test_interval_extremes_on_sample() {
    let catalog = create_test_catalog();
    let result = analyze_intervals(catalog.movies());

    assert_eq!(
        result.min,
        vec![ProducerInterval {
            producer: "Bo Derek".to_string(),
            interval: 6,
            previous_win: 1984,
            following_win: 1990,
        }]
    );
    assert_eq!(
        result.max,
        vec![ProducerInterval {
            producer: "Matthew Vaughn".to_string(),
            interval: 13,
            previous_win: 2002,
            following_win: 2015,
        }]
    );
}

#[test]
fn test_year_view_counts_every_credit() {
    let catalog = create_test_catalog();
    let years = aggregate_by_year(catalog.movies());

    let order: Vec<i32> = years.iter().map(|y| y.year).collect();
    assert_eq!(order, vec![1980, 1981, 1984, 1986, 1990, 2002, 2015]);

    let count_of = |year: i32| years.iter().find(|y| y.year == year).unwrap().winner_count;
    assert_eq!(count_of(1980), 3);
    assert_eq!(count_of(1986), 4);
    assert_eq!(count_of(2015), 8);
}

#[test]
fn test_studio_view_and_top_three() {
    let catalog = create_test_catalog();
    let counts = aggregate_by_studio(catalog.movies());

    let pairs: usize = catalog.movies().iter().map(|m| m.studio_names().len()).sum();
    let total: usize = counts.iter().map(|c| c.win_count).sum();
    assert_eq!(total, pairs);

    let distinct: HashSet<String> = catalog
        .movies()
        .iter()
        .flat_map(|m| m.studio_names())
        .collect();
    assert_eq!(counts.len(), distinct.len());

    let top = top_studios(counts, 3);
    assert_eq!(
        top[0],
        StudioWinCount {
            name: "United Artists".to_string(),
            win_count: 3
        }
    );
    assert_eq!(
        top[1],
        StudioWinCount {
            name: "20th Century Fox".to_string(),
            win_count: 2
        }
    );
    // Ties at 1 keep first-occurrence order
    assert_eq!(top[2].name, "Associated Film Distribution");
}

#[test]
fn test_studio_example() {
    let movies = vec![
        record(2000, "A", "S1, S2", "P", false),
        record(2001, "B", "S1", "P", false),
    ];
    assert_eq!(
        aggregate_by_studio(&movies),
        vec![
            StudioWinCount { name: "S1".to_string(), win_count: 2 },
            StudioWinCount { name: "S2".to_string(), win_count: 1 },
        ]
    );
}

#[test]
fn test_listing_on_sample() {
    let catalog = create_test_catalog();
    let query = MovieQuery {
        producers: Some("vaughn".to_string()),
        ..Default::default()
    };
    let page = query_movies(catalog.movies(), &query);

    assert_eq!(page.total_elements, 2);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.content[0].title, "Swept Away");
    assert_eq!(page.content[1].producers.len(), 5);
}

#[test]
fn test_listing_page_never_exceeds_size() {
    let catalog = create_test_catalog();
    for size in 1..=6 {
        for page in 0..5 {
            let query = MovieQuery {
                page: Some(page),
                size: Some(size),
                ..Default::default()
            };
            let result = query_movies(catalog.movies(), &query);
            assert!(result.content.len() <= size);
        }
    }
}

#[test]
fn test_listing_is_idempotent() {
    let catalog = create_test_catalog();
    let query = MovieQuery {
        winner: Some(true),
        page: Some(1),
        size: Some(3),
        ..Default::default()
    };
    assert_eq!(
        query_movies(catalog.movies(), &query),
        query_movies(catalog.movies(), &query)
    );
}

#[test]
fn test_listing_of_nothing_uses_empty_envelope() {
    let page = query_movies(&[], &MovieQuery::default());
    assert_eq!(page.total_pages, 0);
    assert!(page.content.is_empty());
}

#[test]
fn test_winners_by_year() {
    let catalog = create_test_catalog();
    let winners = movies_by_year(catalog.movies(), 1986, true);
    assert_eq!(
        winners.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(),
        vec!["Howard the Duck", "Under the Cherry Moon"]
    );
    assert_eq!(winners[1].producers, vec!["Bob Cavallo", "Joe Ruffalo", "Steve Fargnoli"]);
}
