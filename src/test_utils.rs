//! Test utilities and fixtures for lastfm-client tests.
//!
//! Response fixtures are trimmed copies of real Last.fm 2.0 XML responses.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{fixtures, mock_client};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (client, transport) = mock_client(MockTransport::ok(fixtures::NEIGHBOURS));
//!     // ... test logic
//! }
//! ```

use std::sync::Arc;

use crate::lastfm::LastFm;
use crate::lastfm::transport::mocks::MockTransport;

/// API key used by every mock client
pub const TEST_API_KEY: &str = "KEY";

/// Base URL used by every mock client
pub const TEST_BASE_URL: &str = "http://lastfm.test/2.0/";

/// Creates a client wired to the given mock transport.
///
/// Returns the transport too so tests can inspect requested URLs and close counts.
pub fn mock_client(transport: MockTransport) -> (LastFm, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let client = LastFm::with_transport(TEST_API_KEY, TEST_BASE_URL, transport.clone());
    (client, transport)
}

pub mod fixtures {
    pub const ERROR_INVALID_KEY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="failed">
  <error code="10">Invalid API key - You must be granted a valid key by last.fm</error>
</lfm>"#;

    pub const ERROR_USER_NOT_FOUND: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="failed">
  <error code="6">User not found</error>
</lfm>"#;

    pub const RECENT_TRACKS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <recenttracks user="RJ" page="1" perPage="10" totalPages="3019" total="30189">
    <track nowplaying="true">
      <artist mbid="2f9ecbed-27be-40e6-abca-6de49d50299e">Aretha Franklin</artist>
      <name>Sisters Are Doing It For Themselves</name>
      <streamable>0</streamable>
      <mbid></mbid>
      <album mbid="">Who's Zoomin' Who?</album>
      <url>https://www.last.fm/music/Aretha+Franklin/_/Sisters+Are+Doing+It+For+Themselves</url>
      <image size="small">https://lastfm.freetls.fastly.net/i/u/34s/aretha.png</image>
      <image size="medium">https://lastfm.freetls.fastly.net/i/u/64s/aretha.png</image>
    </track>
    <track>
      <artist mbid="cc197bad-dc9c-440d-a5b5-d52ba2e14234">Coldplay</artist>
      <name>Clocks</name>
      <streamable>1</streamable>
      <mbid>fd6ecb26-9f5d-4b1a-a8c9-b9b5bd8b6d9d</mbid>
      <album mbid="7b4d7d2c-55b2-4b27-8b4b-5c5f3b7e0a11">Clocks</album>
      <url>https://www.last.fm/music/Coldplay/_/Clocks</url>
      <image size="small">https://lastfm.freetls.fastly.net/i/u/34s/clocks.png</image>
      <date uts="1213031819">9 Jun 2008, 17:16</date>
    </track>
  </recenttracks>
</lfm>"#;

    pub const TRACK_INFO: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <track>
    <id>1019817</id>
    <name>Believe</name>
    <mbid></mbid>
    <url>https://www.last.fm/music/Cher/_/Believe</url>
    <duration>240000</duration>
    <streamable fulltrack="0">1</streamable>
    <listeners>69572</listeners>
    <playcount>281445</playcount>
    <artist>
      <name>Cher</name>
      <mbid>bfcc6d75-a6a5-4bc6-8282-47aec8531818</mbid>
      <url>https://www.last.fm/music/Cher</url>
    </artist>
    <album position="1">
      <artist>Cher</artist>
      <title>Believe</title>
      <mbid>61bf0388-b8a9-48f4-81d1-7eb02706dfb0</mbid>
      <url>https://www.last.fm/music/Cher/Believe</url>
      <image size="small">https://lastfm.freetls.fastly.net/i/u/34s/believe.png</image>
      <image size="large">https://lastfm.freetls.fastly.net/i/u/174s/believe.png</image>
    </album>
    <toptags>
      <tag>
        <name>pop</name>
        <url>https://www.last.fm/tag/pop</url>
      </tag>
      <tag>
        <name>dance</name>
        <url>https://www.last.fm/tag/dance</url>
      </tag>
    </toptags>
    <wiki>
      <published>Sun, 27 Jul 2008 15:44:58 +0000</published>
      <summary>Believe is the twenty-third studio album by Cher.</summary>
      <content>Believe is the twenty-third studio album by Cher, released in 1998.</content>
    </wiki>
    <userplaycount>12</userplaycount>
    <userloved>1</userloved>
  </track>
</lfm>"#;

    pub const TRACK_TOP_TAGS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <toptags artist="Cher" track="Believe">
    <tag>
      <name>pop</name>
      <count>100</count>
      <url>https://www.last.fm/tag/pop</url>
    </tag>
    <tag>
      <name>dance</name>
      <count>68</count>
      <url>https://www.last.fm/tag/dance</url>
    </tag>
  </toptags>
</lfm>"#;

    pub const ARTIST_TOP_TAGS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <toptags artist="Cher">
    <tag>
      <name>pop</name>
      <count>100</count>
      <url>https://www.last.fm/tag/pop</url>
    </tag>
  </toptags>
</lfm>"#;

    pub const NEIGHBOURS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <neighbours user="RJ">
    <user>
      <name>niall_v</name>
      <url>https://www.last.fm/user/niall_v</url>
      <image size="small">https://lastfm.freetls.fastly.net/i/u/34s/niall.png</image>
      <match>0.037733</match>
    </user>
    <user>
      <name>Brainsaw</name>
      <url>https://www.last.fm/user/Brainsaw</url>
      <match>0.0112</match>
    </user>
  </neighbours>
</lfm>"#;

    pub const TOP_ARTISTS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <topartists user="RJ" type="overall" page="1" perPage="50" totalPages="104" total="5186">
    <artist rank="1">
      <name>Dream Theater</name>
      <playcount>1337</playcount>
      <mbid>28503ab7-8bf2-4666-a7bd-2644bfc7cb1d</mbid>
      <url>https://www.last.fm/music/Dream+Theater</url>
      <streamable>1</streamable>
      <image size="small">https://lastfm.freetls.fastly.net/i/u/34s/dt.png</image>
    </artist>
    <artist rank="2">
      <name>Opeth</name>
      <playcount>1040</playcount>
      <mbid></mbid>
      <url>https://www.last.fm/music/Opeth</url>
      <streamable>0</streamable>
    </artist>
  </topartists>
</lfm>"#;

    pub const COMPARISON: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<lfm status="ok">
  <comparison>
    <input>
      <user>
        <name>RJ</name>
        <url>https://www.last.fm/user/RJ</url>
      </user>
      <user>
        <name>Rudolf</name>
        <url>https://www.last.fm/user/Rudolf</url>
      </user>
    </input>
    <result>
      <score>0.78</score>
      <artists matches="42">
        <artist>
          <name>Radiohead</name>
          <url>https://www.last.fm/music/Radiohead</url>
        </artist>
        <artist>
          <name>Björk</name>
          <url>https://www.last.fm/music/Bj%C3%B6rk</url>
        </artist>
        <artist>
          <name>Portishead</name>
          <url>https://www.last.fm/music/Portishead</url>
        </artist>
      </artists>
    </result>
  </comparison>
</lfm>"#;
}
