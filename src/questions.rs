//! Trivia question bank.
//!
//! Every checkpoint the player reaches opens one of these questions. A session shuffles the bank
//! once and then hands questions out in rotation.

use rand::{seq::SliceRandom as _, Rng};

/// A multiple-choice trivia question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    /// Question text shown to the player.
    pub prompt: &'static str,
    /// Answer options in display order.
    pub options: &'static [&'static str],
    /// Index into [`options`](Question::options) of the right answer.
    pub correct: usize,
}

impl Question {
    /// Returns whether `option` is the right answer.
    pub const fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

/// Built-in question bank.
pub const BANK: [Question; 20] = [
    Question {
        prompt: "Which data structure is best suited for implementing a LRU cache?",
        options: &[
            "Stack",
            "Queue",
            "HashMap + Doubly Linked List",
            "Binary Search Tree",
        ],
        correct: 2,
    },
    Question {
        prompt: "What is the primary purpose of virtual memory in an operating system?",
        options: &[
            "Increase CPU speed",
            "Store temporary files",
            "Allow programs to use more memory than physically available",
            "Improve network performance",
        ],
        correct: 2,
    },
    Question {
        prompt: "Which HTTP method is idempotent?",
        options: &["POST", "PATCH", "PUT", "CONNECT"],
        correct: 2,
    },
    Question {
        prompt: "Which layer of the OSI model is responsible for encryption and compression?",
        options: &["Transport", "Session", "Presentation", "Application"],
        correct: 2,
    },
    Question {
        prompt: "In SQL, which command removes all rows from a table but keeps the table structure?",
        options: &["DROP", "DELETE", "REMOVE", "TRUNCATE"],
        correct: 3,
    },
    Question {
        prompt: "What is the time complexity of searching a balanced binary search tree?",
        options: &["O(1)", "O(log n)", "O(n)", "O(n log n)"],
        correct: 1,
    },
    Question {
        prompt: "Which of the following is not a NoSQL database?",
        options: &["MongoDB", "Cassandra", "Redis", "PostgreSQL"],
        correct: 3,
    },
    Question {
        prompt: "What does DNS primarily do?",
        options: &[
            "Encrypt data",
            "Route packets",
            "Translate domain names to IP addresses",
            "Authenticate users",
        ],
        correct: 2,
    },
    Question {
        prompt: "In Git, which command is used to combine multiple commits into one?",
        options: &["git merge", "git rebase", "git stash", "git reset"],
        correct: 1,
    },
    Question {
        prompt: "Which programming paradigm does React.js primarily follow?",
        options: &["Procedural", "Object-Oriented", "Declarative", "Functional only"],
        correct: 2,
    },
    Question {
        prompt: "What is a deadlock in an operating system?",
        options: &[
            "When CPU is idle",
            "When two processes wait indefinitely for each other",
            "When a process finishes execution",
            "When memory is full",
        ],
        correct: 1,
    },
    Question {
        prompt: "Which of the following is used to style web pages?",
        options: &["HTML", "JavaScript", "CSS", "PHP"],
        correct: 2,
    },
    Question {
        prompt: "What is the default port number for HTTPS?",
        options: &["21", "80", "443", "8080"],
        correct: 2,
    },
    Question {
        prompt: "Which algorithm finds shortest paths in graphs with non-negative weights?",
        options: &["DFS", "BFS", "Dijkstra's Algorithm", "Kruskal's Algorithm"],
        correct: 2,
    },
    Question {
        prompt: "What is the purpose of Docker?",
        options: &[
            "Code compilation",
            "Virtualization at hardware level",
            "Containerization of applications",
            "Database management",
        ],
        correct: 2,
    },
    Question {
        prompt: "Which type of memory is non-volatile?",
        options: &["RAM", "Cache", "Register", "ROM"],
        correct: 3,
    },
    Question {
        prompt: "What does API stand for?",
        options: &[
            "Advanced Programming Interface",
            "Application Programming Interface",
            "Automated Program Interaction",
            "Application Process Integration",
        ],
        correct: 1,
    },
    Question {
        prompt: "Which of the following best describes Cloud Computing?",
        options: &[
            "Running applications only on local machines",
            "Sharing hardware without internet",
            "On-demand delivery of computing resources over the internet",
            "Offline storage system",
        ],
        correct: 2,
    },
    Question {
        prompt: "Which of the following is a synchronous programming language feature?",
        options: &["Callback", "Promise", "Blocking I/O", "Event Listener"],
        correct: 2,
    },
    Question {
        prompt: "What is the main purpose of indexing in databases?",
        options: &[
            "Increase storage size",
            "Reduce query execution time",
            "Improve security",
            "Normalize data",
        ],
        correct: 1,
    },
];

/// Returns a uniformly shuffled copy of `bank`.
pub fn shuffled<R: Rng + ?Sized>(bank: &[Question], rng: &mut R) -> Vec<Question> {
    let mut deck = bank.to_vec();
    deck.shuffle(rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng as _};

    #[test]
    fn test_bank_answers_are_in_range() {
        for question in &BANK {
            assert!(
                question.correct < question.options.len(),
                "answer index out of range for {:?}",
                question.prompt
            );
            assert!(!question.options.is_empty(), "question without options");
        }
    }

    #[test]
    fn test_shuffled_is_a_permutation() {
        let deck = shuffled(&BANK, &mut StdRng::seed_from_u64(8));

        assert_eq!(deck.len(), BANK.len());
        for question in &BANK {
            assert!(deck.contains(question), "missing {:?}", question.prompt);
        }
    }

    #[test]
    fn test_shuffled_depends_on_seed() {
        let first = shuffled(&BANK, &mut StdRng::seed_from_u64(1));
        let again = shuffled(&BANK, &mut StdRng::seed_from_u64(1));

        assert_eq!(first, again);
    }

    #[test]
    fn test_is_correct() {
        let question = BANK.first().expect("bank is not empty");

        assert!(question.is_correct(2));
        assert!(!question.is_correct(0));
        assert!(!question.is_correct(9));
    }
}
