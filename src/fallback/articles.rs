use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{Article, ArticleStatus, User};

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

fn author(
    id: &str,
    name: &str,
    username: &str,
    email: &str,
    bio: &str,
    joined: DateTime<Utc>,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        bio: bio.to_string(),
        followers: BTreeSet::new(),
        following: BTreeSet::new(),
        created_at: Some(joined),
        updated_at: Some(joined),
    }
}

struct Demo {
    id: &'static str,
    slug: &'static str,
    title: &'static str,
    content: &'static str,
    tags: [&'static str; 3],
    likes: u32,
    published: DateTime<Utc>,
}

impl Demo {
    fn into_article(self, author: &User) -> Article {
        Article {
            id: self.id.to_string(),
            title: self.title.to_string(),
            content: self.content.to_string(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            status: ArticleStatus::Published,
            author: author.clone(),
            likes: BTreeSet::new(),
            likes_count: self.likes,
            slug: self.slug.to_string(),
            created_at: self.published,
            updated_at: self.published,
        }
    }
}

pub(super) fn build() -> Vec<Article> {
    let team = author(
        "demo-author-001",
        "Akshar Team",
        "akshar-team",
        "team@akshar.dev",
        "The creative minds behind Akshar, a platform for thoughtful writing.",
        at(2025, 12, 1, 0, 0),
    );
    let aarav = author(
        "demo-author-002",
        "Aarav Sharma",
        "aarav-writes",
        "aarav@akshar.dev",
        "Exploring the intersection of technology and culture.",
        at(2025, 11, 15, 0, 0),
    );
    let priya = author(
        "demo-author-003",
        "Priya Verma",
        "priya-creates",
        "priya@akshar.dev",
        "Writer, thinker, and lifelong learner.",
        at(2025, 10, 20, 0, 0),
    );

    vec![
        Demo {
            id: "demo-001",
            slug: "demo-art-of-thoughtful-writing",
            title: "The Art of Thoughtful Writing in a Distracted World",
            content: r#"<p>In an age of endless notifications and infinite scrolls, the act of sitting down to write, truly write, has become a quiet act of rebellion. We are surrounded by noise, yet the most powerful ideas often emerge from silence.</p>
<p>Writing is not just about putting words on a page. It is about slowing down, observing the world with intention, and giving shape to thoughts that would otherwise remain formless. The best writing doesn't shout; it whispers something true.</p>
<p>This is what Akshar is built for. A space where depth matters more than speed, where quality conversations replace engagement metrics, and where every word carries weight.</p>
<h2>Why Deep Writing Matters</h2>
<p>Research consistently shows that writing in focused environments improves comprehension, memory retention, and creative thinking. When we write thoughtfully, we don't just communicate. We think more clearly.</p>
<p>The digital age has given us incredible tools, but it has also fragmented our attention. Akshar aims to bring back the joy of focused creation, one article at a time.</p>"#,
            tags: ["writing", "creativity", "mindfulness"],
            likes: 42,
            published: at(2026, 2, 18, 10, 30),
        }
        .into_article(&team),
        Demo {
            id: "demo-002",
            slug: "demo-building-communities-around-ideas",
            title: "Building Communities Around Ideas, Not Algorithms",
            content: r#"<p>Social media promised to connect us but ended up isolating us in algorithmic bubbles. What if a platform could bring people together around genuine ideas instead?</p>
<p>The most meaningful conversations happen when people feel safe to share, challenge, and grow together. That's the vision behind community-driven platforms: spaces where your feed is shaped by curiosity, not clicks.</p>
<h2>Beyond the Like Button</h2>
<p>Engagement should be measured in depth, not volume. A single thoughtful comment is worth more than a thousand hollow likes. When we design for depth, we create spaces where real connection can flourish.</p>
<p>Communities built around shared interests and authentic expression tend to be more resilient and more fulfilling for their members.</p>"#,
            tags: ["community", "technology", "social"],
            likes: 38,
            published: at(2026, 2, 15, 14, 0),
        }
        .into_article(&aarav),
        Demo {
            id: "demo-003",
            slug: "demo-philosophy-of-samvaad",
            title: "The Philosophy of Samvaad: Meaningful Dialogue",
            content: r#"<p>The Sanskrit word <em>Samvaad</em> (संवाद) means dialogue. Not just any conversation, but a meaningful exchange that leads to mutual understanding. In Indian philosophical traditions, samvaad was considered the highest form of intellectual engagement.</p>
<p>Unlike debate, which seeks to win, samvaad seeks to understand. It is a process of co-creation where both participants emerge wiser than they began.</p>
<h2>Bringing Samvaad Online</h2>
<p>Can digital spaces foster this kind of deep dialogue? We believe they can, with the right design choices. Comment sections don't have to be toxic. When we design for reflection rather than reaction, something beautiful emerges.</p>"#,
            tags: ["philosophy", "culture", "dialogue"],
            likes: 56,
            published: at(2026, 2, 12, 9, 15),
        }
        .into_article(&priya),
        Demo {
            id: "demo-004",
            slug: "demo-designing-for-focus",
            title: "Designing for Focus: Lessons from Minimalist Architecture",
            content: r#"<p>The best digital experiences, much like the best architecture, know what to leave out. Minimalism isn't about austerity; it's about creating space for what truly matters.</p>
<p>When we remove clutter from interfaces, we give users permission to focus. Every element that doesn't serve a purpose becomes a distraction. The whitespace isn't empty. It's breathing room for thought.</p>
<h2>Less Interface, More Experience</h2>
<p>The most powerful writing tools are often the simplest. A blank page, a blinking cursor, and the freedom to think: that's where great writing begins.</p>
<p>At Akshar, every design decision starts with a question: does this help the writer write, and the reader read?</p>"#,
            tags: ["design", "minimalism", "ux"],
            likes: 29,
            published: at(2026, 2, 8, 16, 45),
        }
        .into_article(&team),
        Demo {
            id: "demo-005",
            slug: "demo-from-akshar-to-expression",
            title: "From Akshar to Expression: The Journey of Every Writer",
            content: r#"<p><em>Akshar</em> (अक्षर), the imperishable letter. In Sanskrit, it refers to the smallest unit of written language, yet it carries a profound meaning: that which cannot be destroyed. Every great story began with a single akshar.</p>
<p>The journey from that first letter to a fully formed piece of writing is one of the most human experiences there is. It requires courage, patience, and a willingness to be vulnerable on the page.</p>
<h2>Everyone Has a Story</h2>
<p>You don't need to be a professional writer to have something worth saying. The best blogs come from people who write because the ideas inside them demand expression.</p>
<p>Start with one akshar. The rest will follow.</p>"#,
            tags: ["writing", "inspiration", "culture"],
            likes: 67,
            published: at(2026, 2, 5, 11, 20),
        }
        .into_article(&aarav),
    ]
}
