//! Keyword tables for guessing streaming providers from free text
//!
//! Tables are ordered: matches are reported in table order, so earlier entries
//! take precedence when several providers are mentioned.

use crate::metadata_retrieval::Provider;

const NETFLIX_LOGO: &str = "/t2yyOv40HZeVlLjYsCsPHnWLk4W.jpg";
const PRIME_VIDEO_LOGO: &str = "/emthp39XA2YScoYL1p0sdbAH2WA.jpg";
const DISNEY_PLUS_LOGO: &str = "/7rwgEs15tFwyR9NPQ5vpzxTj19Q.jpg";
const STAR_PLUS_LOGO: &str = "/zqPiJW4AeFS4OQkJvNnxgJ0eFaV.jpg";
const HBO_MAX_LOGO: &str = "/aS2zvJWn9mwiCOeaaCkIh4wleZS.jpg";
const APPLE_TV_PLUS_LOGO: &str = "/6uhKBfmtzFqOcLousHwZuzcrScK.jpg";
const PARAMOUNT_PLUS_LOGO: &str = "/xbhHHa1YgtpwhC8lb1NQ3ACVcLd.jpg";
const GLOBOPLAY_LOGO: &str = "/jPXksH9rTFDgiU4ZBQkgPWUuKpi.jpg";
const DISCOVERY_PLUS_LOGO: &str = "/1D1bS3Dyw4ScYnFWTlBOvJXC3nb.jpg";
const UNIVERSAL_PLUS_LOGO: &str = "/oWPBXgmRxF6VUH1gsoI6bfKF4d.jpg";

/// A provider and the lowercase phrases that give it away
pub(crate) struct ProviderKeywords {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub logo_path: &'static str,
}

/// Maps a network name fragment to a provider
pub(crate) struct NetworkMapping {
    pub network: &'static str,
    pub provider_name: &'static str,
    pub logo_path: &'static str,
}

/// Phrases searched in show synopses and network names
pub(crate) const SHOW_KEYWORDS: &[ProviderKeywords] = &[
    ProviderKeywords {
        name: "Netflix",
        keywords: &["netflix", "série original netflix", "netflix original"],
        logo_path: NETFLIX_LOGO,
    },
    ProviderKeywords {
        name: "Prime Video",
        keywords: &["prime video", "amazon prime", "amazon original"],
        logo_path: PRIME_VIDEO_LOGO,
    },
    ProviderKeywords {
        name: "Disney+",
        keywords: &["disney+", "disney plus", "série original disney"],
        logo_path: DISNEY_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "Star+",
        keywords: &["star+", "star plus"],
        logo_path: STAR_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "HBO Max",
        keywords: &["hbo max", "hbo", "max original"],
        logo_path: HBO_MAX_LOGO,
    },
    ProviderKeywords {
        name: "Apple TV+",
        keywords: &["apple tv+", "apple tv plus", "apple original"],
        logo_path: APPLE_TV_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "Paramount+",
        keywords: &["paramount+", "paramount plus"],
        logo_path: PARAMOUNT_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "Globoplay",
        keywords: &["globoplay"],
        logo_path: GLOBOPLAY_LOGO,
    },
    ProviderKeywords {
        name: "Discovery+",
        keywords: &["discovery+", "discovery plus"],
        logo_path: DISCOVERY_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "Universal+",
        keywords: &["universal+", "universal plus"],
        logo_path: UNIVERSAL_PLUS_LOGO,
    },
];

/// Phrases searched in trailer titles, descriptions and channel names.
///
/// Trailer text is promotional, so it adds slogans like "só na netflix".
pub(crate) const TRAILER_KEYWORDS: &[ProviderKeywords] = &[
    ProviderKeywords {
        name: "Netflix",
        keywords: &[
            "netflix",
            "série original netflix",
            "netflix original",
            "só na netflix",
            "exclusivo netflix",
        ],
        logo_path: NETFLIX_LOGO,
    },
    ProviderKeywords {
        name: "Prime Video",
        keywords: &["prime video", "amazon prime", "amazon original", "prime original"],
        logo_path: PRIME_VIDEO_LOGO,
    },
    ProviderKeywords {
        name: "Disney+",
        keywords: &["disney+", "disney plus", "série original disney", "disney original"],
        logo_path: DISNEY_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "Star+",
        keywords: &["star+", "star plus", "série star original"],
        logo_path: STAR_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "HBO Max",
        keywords: &["hbo max", "hbo", "max original", "série hbo"],
        logo_path: HBO_MAX_LOGO,
    },
    ProviderKeywords {
        name: "Apple TV+",
        keywords: &["apple tv+", "apple tv plus", "apple original", "apple tv"],
        logo_path: APPLE_TV_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "Paramount+",
        keywords: &["paramount+", "paramount plus", "série paramount"],
        logo_path: PARAMOUNT_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "Globoplay",
        keywords: &["globoplay", "original globoplay"],
        logo_path: GLOBOPLAY_LOGO,
    },
    ProviderKeywords {
        name: "Discovery+",
        keywords: &["discovery+", "discovery plus"],
        logo_path: DISCOVERY_PLUS_LOGO,
    },
    ProviderKeywords {
        name: "Universal+",
        keywords: &["universal+", "universal plus"],
        logo_path: UNIVERSAL_PLUS_LOGO,
    },
];

/// Network name fragments, matched case-insensitively against network names
pub(crate) const NETWORK_MAPPINGS: &[NetworkMapping] = &[
    NetworkMapping {
        network: "Netflix",
        provider_name: "Netflix",
        logo_path: NETFLIX_LOGO,
    },
    NetworkMapping {
        network: "Amazon",
        provider_name: "Prime Video",
        logo_path: PRIME_VIDEO_LOGO,
    },
    NetworkMapping {
        network: "Disney+",
        provider_name: "Disney Plus",
        logo_path: DISNEY_PLUS_LOGO,
    },
    NetworkMapping {
        network: "Star+",
        provider_name: "Star Plus",
        logo_path: STAR_PLUS_LOGO,
    },
    NetworkMapping {
        network: "HBO",
        provider_name: "HBO Max",
        logo_path: HBO_MAX_LOGO,
    },
    NetworkMapping {
        network: "Apple TV+",
        provider_name: "Apple TV Plus",
        logo_path: APPLE_TV_PLUS_LOGO,
    },
    NetworkMapping {
        network: "Paramount",
        provider_name: "Paramount Plus",
        logo_path: PARAMOUNT_PLUS_LOGO,
    },
    NetworkMapping {
        network: "Globoplay",
        provider_name: "Globoplay",
        logo_path: GLOBOPLAY_LOGO,
    },
    NetworkMapping {
        network: "Discovery",
        provider_name: "Discovery+",
        logo_path: DISCOVERY_PLUS_LOGO,
    },
    NetworkMapping {
        network: "Universal",
        provider_name: "Universal+",
        logo_path: UNIVERSAL_PLUS_LOGO,
    },
];

/// Returns every provider with at least one keyword in `text`, in table order.
///
/// `text` must already be lowercase.
pub(crate) fn match_keywords(text: &str, table: &[ProviderKeywords]) -> Vec<Provider> {
    table
        .iter()
        .filter(|entry| entry.keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|entry| Provider::new(entry.name, entry.logo_path))
        .collect()
}

/// Returns the provider for the first mapping whose fragment occurs in `network_name`
pub(crate) fn match_network(network_name: &str) -> Option<Provider> {
    let network_name = network_name.to_lowercase();
    NETWORK_MAPPINGS
        .iter()
        .find(|mapping| network_name.contains(&mapping.network.to_lowercase()))
        .map(|mapping| Provider::new(mapping.provider_name, mapping.logo_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(providers: &[Provider]) -> Vec<&str> {
        providers.iter().map(|p| p.display_name()).collect()
    }

    #[test]
    fn test_provider_listed_once_for_several_keywords() {
        let providers = match_keywords("netflix original, só na netflix", TRAILER_KEYWORDS);
        assert_eq!(names(&providers), vec!["Netflix"]);
        assert_eq!(providers[0].logo_path.as_deref(), Some(NETFLIX_LOGO));
    }

    #[test]
    fn test_matches_follow_table_order() {
        let providers = match_keywords("globoplay e também hbo max", SHOW_KEYWORDS);
        assert_eq!(names(&providers), vec!["HBO Max", "Globoplay"]);
    }

    #[test]
    fn test_trailer_table_knows_more_phrases() {
        assert!(match_keywords("disponível na apple tv", SHOW_KEYWORDS).is_empty());
        assert_eq!(
            names(&match_keywords("disponível na apple tv", TRAILER_KEYWORDS)),
            vec!["Apple TV+"]
        );
    }

    #[test]
    fn test_no_match() {
        assert!(match_keywords("uma série sobre dragões", SHOW_KEYWORDS).is_empty());
    }

    #[test]
    fn test_network_mapping_is_case_insensitive() {
        let provider = match_network("Amazon Prime Video").unwrap();
        assert_eq!(provider.display_name(), "Prime Video");

        let provider = match_network("paramount network").unwrap();
        assert_eq!(provider.display_name(), "Paramount Plus");

        assert!(match_network("BBC One").is_none());
    }
}
