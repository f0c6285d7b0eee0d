//! Trimmed-down copies of the site's pages, shared by the parser tests

pub const USER_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Userpage of example -- Fur Affinity [dot] net</title></head>
<body>
<table class="maintable">
  <tr>
    <td class="ldot">
      <b>Full Name:</b> Example Name<br>
      <b>Artist Type:</b> Digital Painter<br>
      <b>Registered since:</b> Mar 3rd, 2010 04:25 PM<br>
      <b>Current mood:</b> accomplished<br>
      <br>
      <b>Artist Profile:</b><br>
      Commissions are <b>open</b>.<br>
      See <a href="/journals/example/">journals</a>.
    </td>
  </tr>
  <tr>
    <td class="ldot">
      <b>Pageviews:</b> 12,345<br>
      <b>Submissions:</b> 120<br>
      <b>Comments Received:</b> 2,500<br>
      <b>Comments Given:</b> 310<br>
      <b>Journals:</b> 14<br>
      <b>Favorites:</b> 999<br>
    </td>
  </tr>
</table>
<table id="shout-1002" class="maintable">
  <tr><td class="lead addpad"><a href="/user/friend/">Friend</a></td></tr>
  <tr><td><span class="popup_date" title="Jan 2nd, 2020 01:00 AM">Jan 2nd, 2020 01:00 AM</span></td></tr>
  <tr><td class="no_overflow alt1">
    Nice <b>gallery</b>!
  </td></tr>
</table>
<table id="shout-1001" class="maintable">
  <tr><td class="lead addpad"><a href="/user/other/">Other</a></td></tr>
  <tr><td><span class="popup_date" title="Jan 1st, 2020 11:00 PM">Jan 1st, 2020 11:00 PM</span></td></tr>
  <tr><td class="no_overflow alt1">Hello there</td></tr>
</table>
</body>
</html>"#;

pub const SUBMISSION_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Sunset Fox by example -- Fur Affinity [dot] net</title></head>
<body>
<div id="submission">
<table class="maintable">
  <tr><td>
    <table class="maintable">
      <tr><td class="alt1">
        <div class="actions">
          <a href="/fav/1234/">+Add to Favorites</a>
          <a href="/full/1234/">Full View</a>
          <a href="//d.facdn.net/art/example/1234/sunset_fox.png">Download</a>
        </div>
        <img id="submissionImg" src="//t.facdn.net/1234@400-1577836800.jpg" alt="">
      </td></tr>
    </table>
    <table class="maintable">
      <tr><td class="cat"><b>Sunset Fox</b></td></tr>
      <tr><td class="alt1">by <a href="/user/example/">example</a></td></tr>
      <tr><td class="alt1" valign="top">
        <b>Submission information:</b><br>
        Posted: <span class="popup_date" title="2 years ago">Jan 1st, 2020 12:00 PM</span><br>
        <b>Category:</b> Artwork (Digital)<br>
        <b>Theme:</b> General Furry Art<br>
        <b>Species:</b> Unspecified / Any<br>
        <b>Gender:</b> Any<br>
        <b>Favorites:</b> 1,234<br>
        <b>Comments:</b> 56<br>
        <b>Views:</b> 7,890<br>
        <b>Resolution:</b> 1280x1024<br>
        <div><img alt="General rating" src="/img/labels/general.gif"></div>
        <div id="keywords">
          <a href="/search/@keywords fox">fox</a>
          <a href="/search/@keywords sunset">sunset</a>
          <a href="/search/@keywords digital">digital</a>
        </div>
      </td></tr>
      <tr><td class="alt1">
        A fox watching the <i>sunset</i>.
      </td></tr>
    </table>
  </td></tr>
</table>
</div>
</body>
</html>"#;

pub const JOURNAL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Stream tonight -- Fur Affinity [dot] net</title></head>
<body>
<table class="maintable">
  <tr><td class="cat">
    <b>Stream tonight</b>
    <span class="popup_date" title="Feb 2nd, 2021 03:00 PM">a year ago</span>
  </td></tr>
  <tr><td class="alt1">
    <div class="no_overflow">
      Drawing live at <a href="https://example.net/live">the usual place</a>.
    </div>
  </td></tr>
</table>
</body>
</html>"#;

pub const JOURNALS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Journals of example -- Fur Affinity [dot] net</title></head>
<body>
<table class="maintable">
  <tr><td>
    <table class="maintable">
      <tr><td class="cat">Journals</td></tr>
      <tr><td class="alt1">Newest first</td></tr>
      <tr><td>
        <table><tr><td>
          <table class="maintable" id="jid:45"><tr><td class="cat">Stream tonight</td></tr></table>
          <table class="maintable" id="jid:44"><tr><td class="cat">Commissions open</td></tr></table>
          <table class="maintable" id="jid:40"><tr><td class="cat">Hello</td></tr></table>
        </td></tr></table>
      </td></tr>
    </table>
  </td></tr>
</table>
</body>
</html>"#;

pub const GALLERY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Artwork Gallery for example -- Fur Affinity [dot] net</title></head>
<body>
<table class="maintable">
  <tr><td class="alt1" id="gallery">
    <b id="sid_1234" class="t-image"><u><a href="/view/1234/"><img src="//t.facdn.net/1234@200.jpg"></a></u></b>
    <b id="sid_" class="t-image"><u><a href="/view//"><img src=""></a></u></b>
    <b id="sid_1200" class="t-image"><u><a href="/view/1200/"><img src="//t.facdn.net/1200@200.jpg"></a></u></b>
  </td></tr>
</table>
</body>
</html>"#;

pub const EMPTY_GALLERY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Artwork Gallery for example -- Fur Affinity [dot] net</title></head>
<body>
<table class="maintable">
  <tr><td class="alt1" id="gallery">There are no submissions to list</td></tr>
</table>
</body>
</html>"#;

pub const WATCHLIST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Watched by example -- Fur Affinity [dot] net</title></head>
<body>
<table class="maintable">
  <tr><td class="alt1">
    <a href="/user/friend/"><span class="artist_name">Friend</span></a>
    <a href="/user/other/"><span class="artist_name">Other</span></a>
    <a href="/user/third/"><span class="artist_name">third_one</span></a>
  </td></tr>
</table>
</body>
</html>"#;

pub const SEARCH_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Search -- Fur Affinity [dot] net</title></head>
<body>
<form id="search-form"><input name="q" value="fox"></form>
<div id="search-results">
  <b id="sid_1234" class="t-image"><u><a href="/view/1234/"><img src="//t.facdn.net/1234@200.jpg"></a></u></b>
  <b id="sid_999" class="t-image"><u><a href="/view/999/"><img src="//t.facdn.net/999@200.jpg"></a></u></b>
</div>
</body>
</html>"#;

pub const SYSTEM_ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>System Error</title></head>
<body>
<table class="maintable"><tr><td class="alt1">This user cannot be found.</td></tr></table>
</body>
</html>"#;
