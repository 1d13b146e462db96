//! Supported languages, release regions and UI themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a language, region or theme code is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unsupported {kind} code: {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: String,
}

/// Display language for titles, synopses and labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

impl Language {
    /// Short code used in cache keys and settings ("ko", "en").
    pub fn code(self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }

    /// Locale code understood by the catalog API.
    pub fn api_code(self) -> &'static str {
        match self {
            Language::Ko => "ko-KR",
            Language::En => "en-US",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ko" | "ko-KR" => Ok(Language::Ko),
            "en" | "en-US" => Ok(Language::En),
            other => Err(UnknownCode {
                kind: "language",
                code: other.to_string(),
            }),
        }
    }
}

/// Color theme persisted alongside the other settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

macro_rules! regions {
    ($( $variant:ident => $code:literal, $en:literal, $ko:literal; )+) => {
        /// Release territory filter. `All` disables territory filtering.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Region {
            #[default]
            #[serde(rename = "ALL")]
            All,
            $(
                #[serde(rename = $code)]
                $variant,
            )+
        }

        impl Region {
            /// Every region in display order, starting with `All`.
            pub const ALL_REGIONS: &'static [Region] = &[Region::All, $(Region::$variant,)+];

            /// ISO 3166-1 code, or "ALL".
            pub fn code(self) -> &'static str {
                match self {
                    Region::All => "ALL",
                    $(Region::$variant => $code,)+
                }
            }

            /// Localized region name.
            pub fn display_name(self, language: Language) -> &'static str {
                match (self, language) {
                    (Region::All, Language::En) => "Global",
                    (Region::All, Language::Ko) => "전체",
                    $(
                        (Region::$variant, Language::En) => $en,
                        (Region::$variant, Language::Ko) => $ko,
                    )+
                }
            }
        }

        impl FromStr for Region {
            type Err = UnknownCode;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    "ALL" => Ok(Region::All),
                    $($code => Ok(Region::$variant),)+
                    other => Err(UnknownCode {
                        kind: "region",
                        code: other.to_string(),
                    }),
                }
            }
        }
    };
}

regions! {
    Kr => "KR", "South Korea", "한국";
    Jp => "JP", "Japan", "일본";
    Cn => "CN", "China", "중국";
    Tw => "TW", "Taiwan", "대만";
    Hk => "HK", "Hong Kong", "홍콩";
    In => "IN", "India", "인도";
    Th => "TH", "Thailand", "태국";
    Sg => "SG", "Singapore", "싱가포르";
    My => "MY", "Malaysia", "말레이시아";
    Ph => "PH", "Philippines", "필리핀";
    Id => "ID", "Indonesia", "인도네시아";
    Vn => "VN", "Vietnam", "베트남";
    Us => "US", "United States", "미국";
    Ca => "CA", "Canada", "캐나다";
    Mx => "MX", "Mexico", "멕시코";
    Gb => "GB", "United Kingdom", "영국";
    Fr => "FR", "France", "프랑스";
    De => "DE", "Germany", "독일";
    It => "IT", "Italy", "이탈리아";
    Es => "ES", "Spain", "스페인";
    Pt => "PT", "Portugal", "포르투갈";
    Nl => "NL", "Netherlands", "네덜란드";
    Be => "BE", "Belgium", "벨기에";
    At => "AT", "Austria", "오스트리아";
    Ch => "CH", "Switzerland", "스위스";
    Se => "SE", "Sweden", "스웨덴";
    Dk => "DK", "Denmark", "덴마크";
    No => "NO", "Norway", "노르웨이";
    Fi => "FI", "Finland", "핀란드";
    Pl => "PL", "Poland", "폴란드";
    Gr => "GR", "Greece", "그리스";
    Ie => "IE", "Ireland", "아일랜드";
    Ru => "RU", "Russia", "러시아";
    Tr => "TR", "Turkey", "터키";
    Au => "AU", "Australia", "호주";
    Nz => "NZ", "New Zealand", "뉴질랜드";
    Br => "BR", "Brazil", "브라질";
    Ar => "AR", "Argentina", "아르헨티나";
    Cl => "CL", "Chile", "칠레";
    Co => "CO", "Colombia", "콜롬비아";
    Pe => "PE", "Peru", "페루";
    Il => "IL", "Israel", "이스라엘";
    Ae => "AE", "UAE", "아랍에미리트";
    Sa => "SA", "Saudi Arabia", "사우디아라비아";
    Eg => "EG", "Egypt", "이집트";
    Za => "ZA", "South Africa", "남아프리카";
}

impl Region {
    /// Whether this is the worldwide (unfiltered) region.
    pub fn is_all(self) -> bool {
        self == Region::All
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_api_code() {
        assert_eq!(Language::Ko.api_code(), "ko-KR");
        assert_eq!(Language::En.api_code(), "en-US");
    }

    #[test]
    fn test_language_parse_accepts_both_forms() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ko-KR".parse::<Language>().unwrap(), Language::Ko);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_region_round_trip_codes() {
        for region in Region::ALL_REGIONS {
            assert_eq!(region.code().parse::<Region>().unwrap(), *region);
        }
        assert_eq!(Region::ALL_REGIONS.len(), 47);
    }

    #[test]
    fn test_region_unknown_code() {
        let err = "XX".parse::<Region>().unwrap_err();
        assert_eq!(err.kind, "region");
        assert_eq!(err.code, "XX");
    }

    #[test]
    fn test_region_display_name() {
        assert_eq!(Region::All.display_name(Language::En), "Global");
        assert_eq!(Region::Kr.display_name(Language::Ko), "한국");
        assert_eq!(Region::Gb.display_name(Language::En), "United Kingdom");
    }

    #[test]
    fn test_region_serde_uses_code() {
        let json = serde_json::to_string(&Region::Us).unwrap();
        assert_eq!(json, "\"US\"");
        let region: Region = serde_json::from_str("\"ALL\"").unwrap();
        assert!(region.is_all());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Language::default(), Language::Ko);
        assert_eq!(Region::default(), Region::All);
        assert_eq!(Theme::default(), Theme::Light);
    }
}
