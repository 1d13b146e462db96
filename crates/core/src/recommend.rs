//! Recommendation scoring.
//!
//! A movie is recommended when its title or original title is on the
//! curated allow-list, when it is both well rated and well voted, or when it
//! is very popular.

use std::borrow::Borrow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// Curated titles, localized and original, ordered by release date.
pub const CURATED_TITLES: &[&str] = &[
    "28년 후: 뼈의 사원",
    "28 Years Later: The Bone Temple",
    "프로젝트 Y",
    "Project Y",
    "노 머시: 90분",
    "Mercy",
    "폭풍의 언덕",
    "Wuthering Heights",
    "고트",
    "GOAT",
    "휴민트",
    "크라임 101",
    "Crime 101",
    "호퍼스",
    "Hoppers",
    "프로젝트 헤일메리",
    "Project Hail Mary",
    "슈퍼 마리오 갤럭시",
    "The Super Mario Galaxy Movie",
    "마이클",
    "Michael",
    "악마는 프라다를 입는다 2",
    "The Devil Wears Prada 2",
    "만달로리안과 그로구",
    "Star Wars: The Mandalorian and Grogu",
    "마스터즈 오브 더 유니버스",
    "Masters of the Universe",
    "디스클로저 데이",
    "Disclosure Day",
    "토이 스토리 5",
    "Toy Story 5",
    "슈퍼걸",
    "Supergirl",
    "Minions 3",
    "모아나",
    "Moana",
    "오디세이",
    "The Odyssey",
    "스파이더맨: 브랜드 뉴 데이",
    "Spider-Man: Brand New Day",
    "레지던트 이블",
    "Resident Evil",
    "디거",
    "Digger",
    "소셜 레코닝",
    "The Social Reckoning",
    "스트리트 파이터",
    "Street Fighter",
    "헝거게임: 선라이즈 온 더 리핑",
    "The Hunger Games: Sunrise on the Reaping",
    "나니아",
    "Narnia",
    "햄넷",
    "Hamnet",
    "쥬만지 3",
    "Jumanji 3",
    "어벤져스: 둠스데이",
    "Avengers: Doomsday",
    "듄: 파트 3",
    "Dune: Part Three",
];

/// Numeric cut-offs for the rating and popularity rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    #[serde(default = "default_min_vote_average")]
    pub min_vote_average: f64,
    #[serde(default = "default_min_vote_count")]
    pub min_vote_count: u64,
    #[serde(default = "default_min_popularity")]
    pub min_popularity: f64,
}

fn default_min_vote_average() -> f64 {
    7.2
}

fn default_min_vote_count() -> u64 {
    100
}

fn default_min_popularity() -> f64 {
    300.0
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            min_vote_average: default_min_vote_average(),
            min_vote_count: default_min_vote_count(),
            min_popularity: default_min_popularity(),
        }
    }
}

/// Decides which movies get flagged and sorted first.
#[derive(Debug, Clone)]
pub struct RecommendationPolicy {
    thresholds: RecommendationThresholds,
    allow_list: HashSet<String>,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self::new(RecommendationThresholds::default(), Vec::<String>::new())
    }
}

impl RecommendationPolicy {
    /// Policy with the curated titles plus `extra_titles`.
    pub fn new<I, S>(thresholds: RecommendationThresholds, extra_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allow_list = CURATED_TITLES
            .iter()
            .map(|t| t.to_string())
            .chain(extra_titles.into_iter().map(Into::into))
            .collect();
        Self {
            thresholds,
            allow_list,
        }
    }

    pub fn thresholds(&self) -> &RecommendationThresholds {
        &self.thresholds
    }

    /// Exact title match against the allow-list.
    pub fn is_allow_listed(&self, item: &CatalogItem) -> bool {
        self.allow_list.contains(&item.title) || self.allow_list.contains(&item.original_title)
    }

    pub fn is_recommended(&self, item: &CatalogItem) -> bool {
        let t = &self.thresholds;
        self.is_allow_listed(item)
            || (item.vote_average >= t.min_vote_average && item.vote_count >= t.min_vote_count)
            || item.popularity >= t.min_popularity
    }

    /// Move recommended items ahead as a block. The sort is stable, so items
    /// with the same verdict keep their input order.
    pub fn sort_by_recommendation<T: Borrow<CatalogItem>>(&self, items: &mut [T]) {
        items.sort_by_key(|item| !self.is_recommended(item.borrow()));
    }
}
