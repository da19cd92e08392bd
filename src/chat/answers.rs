//! Canned long-form answers, keyed by template rule name
//!
//! Written in the avatar's first-person voice. Looked up once per template
//! match; the table is built on first use and never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

const ANSWERS: &[(&str, &str)] = &[
    ("walk_through_resume",
     "Sure! I started out building interactive front-ends, which is where I fell in love with making \
      complex things feel simple. From there I moved into full-stack work, owning features from the \
      database to the UI. Most recently I've been focused on applied AI: retrieval pipelines, \
      assistants, and the Rust/WebAssembly tooling that makes them fast enough to run right in the \
      browser. Along the way I've mentored newer engineers and shipped several side projects, \
      including the avatar you're talking to now."),
    ("resume_download",
     "You can grab my full resume from the download button at the top of this page. If you'd like a \
      tailored version for a specific role, send me a note through the contact section and I'll \
      get it to you."),
    ("why_hire",
     "I bring a rare mix: I'm comfortable deep in systems code and equally at home polishing a user \
      experience. I ship iteratively, I write things down, and I care about the people who maintain \
      my code after me. If you need someone who can take an ambiguous AI or web problem and turn it \
      into a reliable product, that's exactly what I do best."),
    ("greatest_strength",
     "My greatest strength is turning fuzzy problems into concrete plans. I like to sketch the \
      simplest version that could work, get it in front of users quickly, and then harden it. That \
      habit has helped me deliver on projects where the requirements were still moving."),
    ("greatest_weakness",
     "I used to over-invest in polishing things nobody had asked for yet. These days I time-box \
      exploration and ship a smaller slice first, then let real feedback tell me where the polish \
      actually matters."),
    ("five_years",
     "In five years I see myself leading the technical direction of a product that puts AI in \
      people's hands in a genuinely useful way, while still writing code and mentoring the engineers \
      around me."),
    ("why_software",
     "I got into software because it's the fastest way I know to turn an idea into something people \
      can touch. The first time a small script I wrote saved a friend hours of work, I was hooked, \
      and that feeling still drives me today."),
    ("proudest_project",
     "I'm proudest of this avatar, honestly. It pulls together 3D rendering, natural language \
      handling, and a Rust/WebAssembly core into one experience that feels playful while still \
      answering real questions about my work."),
    ("biggest_challenge",
     "My biggest technical challenge was cutting response latency for an AI assistant that had to \
      search thousands of documents. I moved the ranking into Rust compiled to WebAssembly, added \
      caching, and trimmed the prompt. We ended up more than twice as fast with better answers."),
    ("failure",
     "Early in my career I shipped a migration without a rollback plan, and it cost my team a long \
      night. Since then I treat reversibility as a feature: every risky change I make comes with a \
      way back and a checklist for verifying it."),
    ("conflict",
     "When I disagree with a teammate, I try to make the disagreement about data rather than \
      opinions. We write down what each option optimizes for, agree on what would change our minds, \
      and often run a quick experiment. It keeps the relationship intact and the decision better."),
    ("leadership_example",
     "I led a small team through a rewrite of our search service. I broke the work into milestones \
      anyone could pick up, ran short weekly demos, and made sure everyone owned a visible piece. We \
      shipped on time and two of the engineers went on to lead their own projects."),
    ("teamwork",
     "I love working on teams. I'm the person who writes the design doc nobody asked for, pairs on \
      the tricky bug, and makes sure decisions are captured so the next person doesn't have to \
      rediscover them."),
    ("remote_work",
     "I've worked remotely for several years and I'm very comfortable with it. I over-communicate in \
      writing, keep my work visible, and I'm happy to travel for the moments when being in the same \
      room really matters. Hybrid setups work well for me too."),
    ("salary",
     "I'm happy to talk about compensation once we both know the role is a good fit. I care most \
      about the scope of the work and the team, and I'm confident we can find a number that's fair \
      for both sides."),
    ("availability",
     "I'm open to new opportunities and can usually start within a few weeks of an offer. Reach out \
      through the contact section and we can work out a timeline."),
    ("relocation",
     "I'm open to relocating for the right role and team, and I'm equally comfortable working \
      remotely if that suits you better."),
    ("learning_approach",
     "I learn by building. When a new technology catches my eye, I pick a small, real project and \
      push it until it breaks. I also read source code, follow a handful of researchers and \
      engineers I trust, and write short notes so the lessons stick."),
    ("debugging_approach",
     "I start by making the bug reproducible, then shrink the failing case until the cause has \
      nowhere to hide. I lean on logs and small experiments over guesses, and once it's fixed I add \
      a test so it can't quietly come back."),
    ("code_quality",
     "For me code quality means code the next person can change with confidence. That comes from \
      clear names, small modules, honest tests, and reviews that focus on behaviour rather than \
      style nitpicks."),
    ("testing_philosophy",
     "I test behaviour, not implementation details. Fast unit tests cover the tricky logic, a few \
      integration tests cover the seams, and I add a regression test for every bug I fix."),
    ("system_design",
     "When I design a system I start from the data: where it lives, who writes it, and how fresh it \
      must be. Then I pick the simplest architecture that meets the real load, leaving clear seams \
      for the parts most likely to change."),
    ("favorite_language",
     "Rust is my favourite language right now. I love that the compiler catches whole classes of \
      bugs before they ship, and it runs beautifully in the browser through WebAssembly. For quick \
      experiments I still reach for Python or TypeScript."),
    ("favorite_tech",
     "My favourite piece of tech lately is WebAssembly. Being able to run a fast, safe core like the \
      one answering you right now directly in the browser opens up so many possibilities."),
    ("ai_opinion",
     "I'm optimistic about AI, with a healthy dose of realism. The most valuable applications I see \
      are the ones that quietly remove friction from people's work, and building them well takes \
      the same engineering discipline as any other software: evaluation, monitoring, and care for \
      the user."),
    ("how_built",
     "This page is built with React and Three.js for the 3D avatar, and the conversation logic you're \
      talking to runs as a Rust core compiled to WebAssembly. It classifies your question, pulls the \
      relevant parts of my profile, and hands the reply to the browser's speech synthesis."),
    ("are_you_real",
     "I'm an interactive avatar representing the real person behind this portfolio. My answers come \
      from their actual profile and experience, so think of me as a friendly, always-available \
      introduction."),
    ("hobbies",
     "Outside of coding I love hiking, tinkering with generative art, and reading science fiction. \
      Many of my side projects start as an excuse to combine those interests with code."),
    ("motivation",
     "What drives me is seeing someone use something I built and get their time back. I'm \
      passionate about tools that make hard things feel approachable, whether that's a search box, \
      an assistant, or a 3D avatar on a portfolio page."),
    ("work_style",
     "My work style is iterative and transparent. I like to share progress early, write down \
      decisions, and keep a steady pace rather than sprinting and stalling. I do my best work with \
      clear goals and plenty of autonomy on how to reach them."),
    ("ideal_role",
     "My ideal role sits where AI meets product engineering: a team shipping real features to real \
      users, with room to work across the stack and to help others grow."),
    ("feedback",
     "I actively ask for feedback because it's the fastest way to improve. When I get criticism I \
      listen first, ask questions until I understand the concern, and then follow up to show what I \
      changed."),
    ("pressure",
     "Under pressure I get more structured, not less. I cut scope to what truly matters, communicate \
      early about trade-offs, and keep the team focused on one problem at a time."),
    ("mentoring",
     "I do mentor, and it's one of my favourite parts of the job. I help newer engineers break \
      problems down, review their code with context rather than just corrections, and celebrate the \
      moment they start teaching others."),
    ("open_source",
     "I contribute to open source whenever I can, mostly small fixes and documentation in the Rust \
      and WebAssembly ecosystems. Reading and improving other people's code is one of the best ways \
      I know to grow."),
    ("side_projects",
     "Side projects are my playground. I use them to try new technologies end to end: this avatar, \
      a local-first notes app with hybrid search, and a trail planner that mixes weather and \
      elevation data are a few recent ones."),
    ("references",
     "I'd be glad to provide references from former managers and teammates. Reach out through the \
      contact section and I'll connect you with them."),
    ("fun_fact",
     "Fun fact: the voice and gestures you're seeing were tuned by me recording myself talking to a \
      webcam for an entire afternoon. My neighbours probably think I was rehearsing a play."),
    ("contact_preference",
     "The best way to reach me is by email or LinkedIn; both are listed in the contact section of this \
      page. I usually reply within a day or two."),
    ("thank_you",
     "You're very welcome! Feel free to ask me anything else about my work, projects, or experience."),
    ("goodbye",
     "Thanks for stopping by! If you'd like to keep the conversation going, my contact details are \
      just below. Have a great day!"),
];

fn answer_table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| ANSWERS.iter().copied().collect())
}

/// Canned answer bound to a template name
pub fn canned_answer(name: &str) -> Option<&'static str> {
    answer_table().get(name).copied()
}

/// Canned answer, or a generic holding reply for names without one
pub fn canned_or_stub(name: &str) -> String {
    match canned_answer(name) {
        Some(answer) => answer.to_string(),
        None => format!(
            "That's a great question about {}. Let me think about that... In the meantime, feel free \
             to ask about my projects, skills, or experience.",
            name.replace('_', " ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::template::TEMPLATE_RULES;

    #[test]
    fn test_every_template_has_an_answer() {
        for (name, _) in TEMPLATE_RULES {
            assert!(canned_answer(name).is_some(), "missing answer for {}", name);
        }
    }

    #[test]
    fn test_unknown_name_gets_stub() {
        let stub = canned_or_stub("quantum_origami");
        assert!(stub.contains("quantum origami"));
        assert!(stub.contains("Let me think about that"));
    }

    #[test]
    fn test_known_name_verbatim() {
        assert_eq!(canned_or_stub("goodbye"), canned_answer("goodbye").unwrap());
    }
}
