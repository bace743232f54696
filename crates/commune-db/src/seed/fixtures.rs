//! Development fixture data.
//!
//! Declared as plain data so referential integrity can be checked without a
//! database: every cross-reference here is by username, slug, or title, and
//! must resolve to a fixture declared earlier in the insertion order.

pub struct UserFixture {
    pub username: &'static str,
    pub email: &'static str,
    pub display_name: &'static str,
    pub password: &'static str,
    pub bio: &'static str,
}

pub struct CommunityFixture {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub visibility: &'static str,
    pub founder: &'static str,
}

/// Role template stamped out per community: (name, permissions, position,
/// is_default). Exactly one template is the default role.
pub const ROLE_TEMPLATES: &[(&str, i64, i32, bool)] = &[
    ("Owner", 0x7FFF, 0, false),
    ("Moderator", 0x00FF, 1, false),
    ("Member", 0x000F, 2, true),
];

pub struct MembershipFixture {
    pub user: &'static str,
    pub community: &'static str,
    pub role: &'static str,
}

pub struct TaskFixture {
    pub community: &'static str,
    pub creator: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub status: &'static str,
    pub priority: &'static str,
    pub position: i32,
}

pub struct ChannelFixture {
    pub community: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub topic: &'static str,
    /// Title of the linked task, for task_linked channels.
    pub task: Option<&'static str>,
}

pub struct EventFixture {
    pub community: &'static str,
    pub organizer: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: &'static str,
    pub status: &'static str,
    pub location: Option<&'static str>,
    /// Days from now until the event starts (negative = past).
    pub starts_in_days: i64,
    pub duration_hours: i64,
    pub capacity: Option<i32>,
}

pub struct PortfolioFixture {
    pub user: &'static str,
    pub headline: &'static str,
    pub summary: &'static str,
}

pub struct PortfolioEntryFixture {
    pub user: &'static str,
    pub kind: &'static str,
    pub title: &'static str,
    pub community: Option<&'static str>,
}

pub struct SkillFixture {
    pub user: &'static str,
    pub name: &'static str,
    pub level: i16,
}

pub struct ReputationFixture {
    pub user: &'static str,
    pub community: &'static str,
    pub kind: &'static str,
    pub score: f64,
}

/// Contribution kinds and their stored weights.
pub const CONTRIBUTION_KINDS: &[(&str, i32)] = &[
    ("message", 1),
    ("task_completed", 3),
    ("event_attended", 2),
];

/// Users whose contribution heatmaps get generated rows.
pub const HEATMAP_USERS: &[&str] = &["amara", "bjorn", "chiara", "devonte"];

/// Number of days of heatmap history.
pub const HEATMAP_DAYS: u64 = 90;

/// Probability that a heatmap user has a contribution on a given day.
pub const HEATMAP_DAILY_PROBABILITY: f64 = 0.6;

pub fn users() -> Vec<UserFixture> {
    vec![
        UserFixture {
            username: "amara",
            email: "amara@commune.dev",
            display_name: "Amara Osei",
            password: "amara-dev-password",
            bio: "Rustacean, community gardener, chronic workshop organizer.",
        },
        UserFixture {
            username: "bjorn",
            email: "bjorn@commune.dev",
            display_name: "Björn Lindqvist",
            password: "bjorn-dev-password",
            bio: "Embedded systems by day, pixel art by night.",
        },
        UserFixture {
            username: "chiara",
            email: "chiara@commune.dev",
            display_name: "Chiara Moretti",
            password: "chiara-dev-password",
            bio: "Photographer documenting the city one alley at a time.",
        },
        UserFixture {
            username: "devonte",
            email: "devonte@commune.dev",
            display_name: "Devonte Clark",
            password: "devonte-dev-password",
            bio: "Open hardware tinkerer. Ask me about my soldering burns.",
        },
        UserFixture {
            username: "emilia",
            email: "emilia@commune.dev",
            display_name: "Emilia Nowak",
            password: "emilia-dev-password",
            bio: "Climate organizer and spreadsheet enthusiast.",
        },
    ]
}

pub fn communities() -> Vec<CommunityFixture> {
    vec![
        CommunityFixture {
            slug: "rust-builders",
            name: "Rust Builders",
            description: "Weekly pairing sessions and code review for systems projects.",
            visibility: "public",
            founder: "amara",
        },
        CommunityFixture {
            slug: "urban-gardeners",
            name: "Urban Gardeners",
            description: "Rooftop plots, seed swaps, and composting logistics.",
            visibility: "public",
            founder: "amara",
        },
        CommunityFixture {
            slug: "indie-gamedev",
            name: "Indie Gamedev Circle",
            description: "Monthly jams and playtesting for independent games.",
            visibility: "public",
            founder: "bjorn",
        },
        CommunityFixture {
            slug: "street-photo",
            name: "Street Photography Collective",
            description: "Photo walks, critique threads, and zine production.",
            visibility: "invite_only",
            founder: "chiara",
        },
        CommunityFixture {
            slug: "open-hardware",
            name: "Open Hardware Lab",
            description: "Shared bench space and open-source PCB designs.",
            visibility: "private",
            founder: "devonte",
        },
        CommunityFixture {
            slug: "climate-action",
            name: "Climate Action Network",
            description: "Local campaigns, data projects, and mutual aid coordination.",
            visibility: "public",
            founder: "emilia",
        },
    ]
}

pub fn memberships() -> Vec<MembershipFixture> {
    vec![
        // Founders own their communities
        MembershipFixture { user: "amara", community: "rust-builders", role: "Owner" },
        MembershipFixture { user: "amara", community: "urban-gardeners", role: "Owner" },
        MembershipFixture { user: "bjorn", community: "indie-gamedev", role: "Owner" },
        MembershipFixture { user: "chiara", community: "street-photo", role: "Owner" },
        MembershipFixture { user: "devonte", community: "open-hardware", role: "Owner" },
        MembershipFixture { user: "emilia", community: "climate-action", role: "Owner" },
        // Cross-membership
        MembershipFixture { user: "bjorn", community: "rust-builders", role: "Moderator" },
        MembershipFixture { user: "devonte", community: "rust-builders", role: "Member" },
        MembershipFixture { user: "chiara", community: "urban-gardeners", role: "Member" },
        MembershipFixture { user: "emilia", community: "urban-gardeners", role: "Moderator" },
        MembershipFixture { user: "amara", community: "indie-gamedev", role: "Member" },
        MembershipFixture { user: "devonte", community: "indie-gamedev", role: "Member" },
        MembershipFixture { user: "bjorn", community: "street-photo", role: "Member" },
        MembershipFixture { user: "amara", community: "open-hardware", role: "Member" },
        MembershipFixture { user: "chiara", community: "climate-action", role: "Member" },
    ]
}

pub fn tasks() -> Vec<TaskFixture> {
    vec![
        TaskFixture {
            community: "rust-builders",
            creator: "amara",
            title: "Set up CI for the pairing-session repo",
            description: "GitHub Actions with fmt, clippy, and the test suite.",
            status: "done",
            priority: "high",
            position: 0,
        },
        TaskFixture {
            community: "rust-builders",
            creator: "bjorn",
            title: "Write the async workshop outline",
            description: "Cover executors, pinning, and cancellation pitfalls.",
            status: "in_progress",
            priority: "medium",
            position: 1,
        },
        TaskFixture {
            community: "rust-builders",
            creator: "amara",
            title: "Triage the review queue backlog",
            description: "Anything older than two weeks gets closed or assigned.",
            status: "todo",
            priority: "low",
            position: 2,
        },
        TaskFixture {
            community: "urban-gardeners",
            creator: "amara",
            title: "Order spring seed inventory",
            description: "Tomatoes, kale, and whatever survived last year's aphids.",
            status: "in_review",
            priority: "urgent",
            position: 0,
        },
        TaskFixture {
            community: "urban-gardeners",
            creator: "emilia",
            title: "Fix the north rooftop irrigation timer",
            description: "Controller resets after power cuts; needs a battery backup.",
            status: "todo",
            priority: "high",
            position: 1,
        },
        TaskFixture {
            community: "indie-gamedev",
            creator: "bjorn",
            title: "Pick the theme for the winter jam",
            description: "Shortlist three, run a poll in the announcements channel.",
            status: "backlog",
            priority: "medium",
            position: 0,
        },
        TaskFixture {
            community: "indie-gamedev",
            creator: "bjorn",
            title: "Playtest signup form",
            description: "Collect platform, controller preference, and time zone.",
            status: "done",
            priority: "low",
            position: 1,
        },
        TaskFixture {
            community: "street-photo",
            creator: "chiara",
            title: "Layout the autumn zine",
            description: "24 pages, riso-friendly two-color spreads.",
            status: "in_progress",
            priority: "high",
            position: 0,
        },
        TaskFixture {
            community: "open-hardware",
            creator: "devonte",
            title: "Rev B of the sensor breakout board",
            description: "Fix the swapped SDA/SCL silkscreen and widen the USB pads.",
            status: "in_progress",
            priority: "urgent",
            position: 0,
        },
        TaskFixture {
            community: "climate-action",
            creator: "emilia",
            title: "Digitize the air-quality survey results",
            description: "Spreadsheet template is in the shared drive.",
            status: "cancelled",
            priority: "medium",
            position: 0,
        },
    ]
}

pub fn channels() -> Vec<ChannelFixture> {
    vec![
        ChannelFixture {
            community: "rust-builders",
            name: "general",
            kind: "text",
            topic: "Anything goes, within reason.",
            task: None,
        },
        ChannelFixture {
            community: "rust-builders",
            name: "announcements",
            kind: "announcement",
            topic: "Session schedules and cancellations.",
            task: None,
        },
        ChannelFixture {
            community: "rust-builders",
            name: "async-workshop",
            kind: "task_linked",
            topic: "Coordination for the async workshop.",
            task: Some("Write the async workshop outline"),
        },
        ChannelFixture {
            community: "urban-gardeners",
            name: "general",
            kind: "text",
            topic: "Compost questions welcome.",
            task: None,
        },
        ChannelFixture {
            community: "urban-gardeners",
            name: "harvest-photos",
            kind: "text",
            topic: "Brag board.",
            task: None,
        },
        ChannelFixture {
            community: "indie-gamedev",
            name: "general",
            kind: "text",
            topic: "Show your work-in-progress.",
            task: None,
        },
        ChannelFixture {
            community: "indie-gamedev",
            name: "jam-announcements",
            kind: "announcement",
            topic: "Jam dates, themes, and results.",
            task: None,
        },
        ChannelFixture {
            community: "street-photo",
            name: "critiques",
            kind: "text",
            topic: "Constructive only. One photo per post.",
            task: None,
        },
        ChannelFixture {
            community: "open-hardware",
            name: "general",
            kind: "text",
            topic: "Bench space booking and parts trading.",
            task: None,
        },
        ChannelFixture {
            community: "climate-action",
            name: "campaigns",
            kind: "text",
            topic: "Active campaign coordination.",
            task: None,
        },
    ]
}

pub fn events() -> Vec<EventFixture> {
    vec![
        EventFixture {
            community: "rust-builders",
            organizer: "amara",
            title: "Async Rust Workshop",
            description: "Hands-on session: executors, streams, and backpressure.",
            kind: "hybrid",
            status: "published",
            location: Some("Hack space, Room 2 + stream"),
            starts_in_days: 14,
            duration_hours: 3,
            capacity: Some(30),
        },
        EventFixture {
            community: "urban-gardeners",
            organizer: "amara",
            title: "Spring Seed Swap",
            description: "Bring labeled envelopes; leave with something new.",
            kind: "offline",
            status: "published",
            location: Some("North rooftop garden"),
            starts_in_days: 21,
            duration_hours: 2,
            capacity: None,
        },
        EventFixture {
            community: "indie-gamedev",
            organizer: "bjorn",
            title: "Winter Jam Kickoff",
            description: "Theme reveal and team formation.",
            kind: "online",
            status: "draft",
            location: None,
            starts_in_days: 40,
            duration_hours: 1,
            capacity: None,
        },
        EventFixture {
            community: "street-photo",
            organizer: "chiara",
            title: "Dawn Photo Walk: Harbor District",
            description: "Meet at the old crane. Rain cancels.",
            kind: "offline",
            status: "completed",
            location: Some("Harbor district, pier 3"),
            starts_in_days: -7,
            duration_hours: 3,
            capacity: Some(12),
        },
        EventFixture {
            community: "climate-action",
            organizer: "emilia",
            title: "Air Quality Data Sprint",
            description: "Clean and publish the sensor survey dataset.",
            kind: "hybrid",
            status: "published",
            location: Some("Library annex + video call"),
            starts_in_days: 10,
            duration_hours: 4,
            capacity: Some(20),
        },
    ]
}

pub fn portfolios() -> Vec<PortfolioFixture> {
    vec![
        PortfolioFixture {
            user: "amara",
            headline: "Systems engineer & community organizer",
            summary: "Building tools and gardens in roughly equal measure.",
        },
        PortfolioFixture {
            user: "bjorn",
            headline: "Embedded developer, game jam regular",
            summary: "Firmware for a living, shaders for fun.",
        },
        PortfolioFixture {
            user: "chiara",
            headline: "Documentary photographer",
            summary: "Street and harbor photography, zine publishing.",
        },
        PortfolioFixture {
            user: "devonte",
            headline: "Open hardware designer",
            summary: "PCBs, enclosures, and the occasional repair café.",
        },
        PortfolioFixture {
            user: "emilia",
            headline: "Climate campaigner",
            summary: "Community data projects with real-world teeth.",
        },
    ]
}

pub fn portfolio_entries() -> Vec<PortfolioEntryFixture> {
    vec![
        PortfolioEntryFixture {
            user: "amara",
            kind: "community_founded",
            title: "Founded Rust Builders",
            community: Some("rust-builders"),
        },
        PortfolioEntryFixture {
            user: "bjorn",
            kind: "event_organized",
            title: "Organized the autumn game jam",
            community: Some("indie-gamedev"),
        },
        PortfolioEntryFixture {
            user: "chiara",
            kind: "project",
            title: "Harbor District zine, issue 4",
            community: Some("street-photo"),
        },
        PortfolioEntryFixture {
            user: "devonte",
            kind: "custom",
            title: "Repair café volunteer, 2 years",
            community: None,
        },
    ]
}

pub fn skills() -> Vec<SkillFixture> {
    vec![
        SkillFixture { user: "amara", name: "Rust", level: 5 },
        SkillFixture { user: "amara", name: "Facilitation", level: 4 },
        SkillFixture { user: "bjorn", name: "Embedded C", level: 5 },
        SkillFixture { user: "bjorn", name: "Godot", level: 3 },
        SkillFixture { user: "chiara", name: "Photography", level: 5 },
        SkillFixture { user: "devonte", name: "PCB Design", level: 4 },
        SkillFixture { user: "devonte", name: "Soldering", level: 5 },
        SkillFixture { user: "emilia", name: "Data Analysis", level: 4 },
    ]
}

pub fn reputation_scores() -> Vec<ReputationFixture> {
    vec![
        ReputationFixture { user: "amara", community: "rust-builders", kind: "builder", score: 182.5 },
        ReputationFixture { user: "amara", community: "rust-builders", kind: "mentor", score: 96.0 },
        ReputationFixture { user: "amara", community: "urban-gardeners", kind: "organizer", score: 140.25 },
        ReputationFixture { user: "bjorn", community: "rust-builders", kind: "mentor", score: 58.5 },
        ReputationFixture { user: "bjorn", community: "indie-gamedev", kind: "organizer", score: 77.0 },
        ReputationFixture { user: "chiara", community: "street-photo", kind: "builder", score: 64.75 },
        ReputationFixture { user: "emilia", community: "climate-action", kind: "organizer", score: 201.0 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn usernames() -> HashSet<&'static str> {
        users().iter().map(|u| u.username).collect()
    }

    fn slugs() -> HashSet<&'static str> {
        communities().iter().map(|c| c.slug).collect()
    }

    fn task_titles() -> HashSet<&'static str> {
        tasks().iter().map(|t| t.title).collect()
    }

    #[test]
    fn test_fixture_counts() {
        assert_eq!(users().len(), 5);
        assert_eq!(communities().len(), 6);
        assert_eq!(ROLE_TEMPLATES.len(), 3);
        assert_eq!(tasks().len(), 10);
        assert_eq!(channels().len(), 10);
        assert_eq!(events().len(), 5);
        assert_eq!(portfolios().len(), 5);
        assert_eq!(reputation_scores().len(), 7);
    }

    #[test]
    fn test_users_unique() {
        assert_eq!(usernames().len(), users().len());
        let emails: HashSet<_> = users().iter().map(|u| u.email).collect();
        assert_eq!(emails.len(), users().len());
    }

    #[test]
    fn test_exactly_one_default_role() {
        let defaults = ROLE_TEMPLATES.iter().filter(|r| r.3).count();
        assert_eq!(defaults, 1);
        assert_eq!(ROLE_TEMPLATES.iter().find(|r| r.3).unwrap().0, "Member");
    }

    #[test]
    fn test_role_positions_are_ranked() {
        let positions: Vec<i32> = ROLE_TEMPLATES.iter().map(|r| r.2).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_community_founders_resolve() {
        let names = usernames();
        for c in communities() {
            assert!(names.contains(c.founder), "unknown founder {}", c.founder);
        }
    }

    #[test]
    fn test_memberships_resolve() {
        let names = usernames();
        let communities = slugs();
        let roles: HashSet<_> = ROLE_TEMPLATES.iter().map(|r| r.0).collect();
        for m in memberships() {
            assert!(names.contains(m.user), "unknown user {}", m.user);
            assert!(communities.contains(m.community), "unknown community {}", m.community);
            assert!(roles.contains(m.role), "unknown role {}", m.role);
        }
    }

    #[test]
    fn test_memberships_unique_per_community() {
        let mut seen = HashSet::new();
        for m in memberships() {
            assert!(
                seen.insert((m.user, m.community)),
                "duplicate membership {}/{}",
                m.user,
                m.community
            );
        }
    }

    #[test]
    fn test_every_founder_is_owner_member() {
        let ms = memberships();
        for c in communities() {
            assert!(
                ms.iter()
                    .any(|m| m.user == c.founder && m.community == c.slug && m.role == "Owner"),
                "founder {} has no Owner membership in {}",
                c.founder,
                c.slug
            );
        }
    }

    #[test]
    fn test_tasks_resolve() {
        let names = usernames();
        let communities = slugs();
        for t in tasks() {
            assert!(communities.contains(t.community));
            assert!(names.contains(t.creator));
        }
    }

    #[test]
    fn test_channels_resolve() {
        let communities = slugs();
        let titles = task_titles();
        for ch in channels() {
            assert!(communities.contains(ch.community));
            match ch.kind {
                "task_linked" => {
                    let task = ch.task.expect("task_linked channel must link a task");
                    assert!(titles.contains(task), "unknown task {}", task);
                }
                _ => assert!(ch.task.is_none()),
            }
        }
    }

    #[test]
    fn test_linked_task_is_in_same_community() {
        let all_tasks = tasks();
        for ch in channels() {
            if let Some(title) = ch.task {
                let task = all_tasks.iter().find(|t| t.title == title).unwrap();
                assert_eq!(task.community, ch.community);
            }
        }
    }

    #[test]
    fn test_events_resolve() {
        let names = usernames();
        let communities = slugs();
        for e in events() {
            assert!(communities.contains(e.community));
            assert!(names.contains(e.organizer));
            assert!(e.duration_hours > 0);
        }
    }

    #[test]
    fn test_portfolio_fixtures_resolve() {
        let names = usernames();
        let communities = slugs();
        let portfolio_users: HashSet<_> = portfolios().iter().map(|p| p.user).collect();
        assert_eq!(portfolio_users.len(), portfolios().len());

        for e in portfolio_entries() {
            assert!(portfolio_users.contains(e.user), "entry for user {} without portfolio", e.user);
            if let Some(slug) = e.community {
                assert!(communities.contains(slug));
            }
        }
        for s in skills() {
            assert!(names.contains(s.user));
            assert!((1..=5).contains(&s.level));
        }
    }

    #[test]
    fn test_reputation_scores_resolve_and_are_unique() {
        let names = usernames();
        let communities = slugs();
        let mut seen = HashSet::new();
        for r in reputation_scores() {
            assert!(names.contains(r.user));
            assert!(communities.contains(r.community));
            assert!(
                seen.insert((r.user, r.community, r.kind)),
                "duplicate score {}/{}/{}",
                r.user,
                r.community,
                r.kind
            );
        }
    }

    #[test]
    fn test_heatmap_users_resolve() {
        let names = usernames();
        for u in HEATMAP_USERS {
            assert!(names.contains(u));
        }
        assert_eq!(HEATMAP_USERS.len(), 4);
    }

    #[test]
    fn test_heatmap_volume_bound() {
        // Upper bound on generated contribution rows: one per user per day.
        let max = HEATMAP_USERS.len() as u64 * HEATMAP_DAYS;
        assert_eq!(max, 360);
        assert!(HEATMAP_DAILY_PROBABILITY > 0.0 && HEATMAP_DAILY_PROBABILITY < 1.0);
    }
}
