use crate::choice::parse_choices;
use crate::error::SessionError;
use crate::grading::{check_answer, feedback, is_correct_choice};
use crate::logger;
use crate::models::{
    Answer, ChoiceMark, ChoiceView, Question, QuestionType, QuestionView, RawQuestion, Score,
    Verdict,
};
use crate::shuffle::fisher_yates;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    Jump(usize),
}

/// One quiz attempt over a loaded bank.
///
/// Questions are grouped by type (single, multiple, true/false) and shuffled
/// within each group; each question's choices are shuffled once at load.
/// After [`QuizSession::grade`] the responses are frozen and the session only
/// serves read-only views; starting over means loading a new session.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank_name: String,
    questions: Vec<Question>,
    responses: Vec<Option<Answer>>,
    cursor: usize,
    graded: bool,
}

fn group_index(question_type: QuestionType) -> usize {
    match question_type {
        QuestionType::Single => 0,
        QuestionType::Multiple => 1,
        QuestionType::TrueFalse => 2,
    }
}

impl QuizSession {
    pub fn load<R: Rng + ?Sized>(
        bank_name: impl Into<String>,
        raw_questions: Vec<RawQuestion>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if raw_questions.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        let mut groups: [Vec<Question>; 3] = Default::default();
        for record in raw_questions {
            let question_type = QuestionType::from_tag(record.question_type.as_deref());
            let mut presentation = parse_choices(&record.choices);
            fisher_yates(&mut presentation, rng);

            groups[group_index(question_type)].push(Question {
                id: 0,
                prompt: record.question,
                question_type,
                choice_set: record.choices,
                presentation,
                answer: record.answer,
                explanation: record.explanation,
            });
        }

        let mut questions = Vec::new();
        for mut group in groups {
            fisher_yates(&mut group, rng);
            questions.extend(group);
        }
        for (id, question) in questions.iter_mut().enumerate() {
            question.id = id;
        }

        let bank_name = bank_name.into();
        logger::log(&format!(
            "Loaded bank '{}' with {} questions",
            bank_name,
            questions.len()
        ));

        Ok(Self {
            bank_name,
            responses: vec![None; questions.len()],
            questions,
            cursor: 0,
            graded: false,
        })
    }

    pub fn bank_name(&self) -> &str {
        &self.bank_name
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_graded(&self) -> bool {
        self.graded
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    pub fn response(&self, index: usize) -> Option<&Answer> {
        self.responses.get(index).and_then(Option::as_ref)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.response(index).is_some()
    }

    pub fn answered_count(&self) -> usize {
        self.responses.iter().filter(|r| r.is_some()).count()
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            })
        }
    }

    /// Overwrites the response for `index`. An empty multiple-choice set is
    /// stored as unanswered.
    pub fn record_answer(
        &mut self,
        index: usize,
        answer: Option<Answer>,
    ) -> Result<(), SessionError> {
        if self.graded {
            return Err(SessionError::SessionLocked);
        }
        self.check_index(index)?;

        let question_type = self.questions[index].question_type;
        let answer = match (question_type, answer) {
            (_, None) => None,
            (QuestionType::Multiple, Some(Answer::Multiple(letters))) => {
                if letters.is_empty() {
                    None
                } else {
                    Some(Answer::Multiple(letters))
                }
            }
            (QuestionType::Single | QuestionType::TrueFalse, Some(Answer::Single(letter))) => {
                Some(Answer::Single(letter))
            }
            _ => return Err(SessionError::AnswerKindMismatch { index }),
        };

        self.responses[index] = answer;
        Ok(())
    }

    pub fn navigate(&mut self, navigation: Navigation) -> Result<QuestionView<'_>, SessionError> {
        match navigation {
            Navigation::Previous => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Navigation::Next => {
                if self.cursor < self.questions.len().saturating_sub(1) {
                    self.cursor += 1;
                }
            }
            Navigation::Jump(index) => {
                self.check_index(index)?;
                self.cursor = index;
            }
        }
        Ok(self.build_view(self.cursor))
    }

    pub fn current_view(&self) -> QuestionView<'_> {
        self.build_view(self.cursor)
    }

    pub fn view(&self, index: usize) -> Result<QuestionView<'_>, SessionError> {
        self.check_index(index)?;
        Ok(self.build_view(index))
    }

    fn build_view(&self, index: usize) -> QuestionView<'_> {
        let question = &self.questions[index];
        let response = self.responses[index].as_ref();

        let choices = question
            .presentation
            .iter()
            .map(|choice| {
                let selected = response.is_some_and(|answer| answer.contains(&choice.letter));
                let mark = if !self.graded {
                    None
                } else if is_correct_choice(question, &choice.letter) {
                    Some(ChoiceMark::Correct)
                } else if selected {
                    Some(ChoiceMark::Incorrect)
                } else {
                    None
                };
                ChoiceView {
                    letter: &choice.letter,
                    text: &choice.text,
                    selected,
                    mark,
                }
            })
            .collect();

        QuestionView {
            index,
            total: self.questions.len(),
            prompt: &question.prompt,
            question_type: question.question_type,
            choices,
            response,
            graded: self.graded,
            feedback: self.graded.then(|| feedback(question, response)),
        }
    }

    /// Verdicts for every question in working order, computed from the
    /// current responses.
    pub fn evaluate(&self) -> Vec<Verdict> {
        self.questions
            .iter()
            .zip(&self.responses)
            .map(|(question, response)| check_answer(question, response.as_ref()))
            .collect()
    }

    /// Available only after grading.
    pub fn verdicts(&self) -> Option<Vec<Verdict>> {
        self.graded.then(|| self.evaluate())
    }

    /// Available only after grading.
    pub fn verdict(&self, index: usize) -> Option<Verdict> {
        if !self.graded {
            return None;
        }
        let question = self.questions.get(index)?;
        Some(check_answer(question, self.responses[index].as_ref()))
    }

    /// Available only after grading.
    pub fn score(&self) -> Option<Score> {
        if !self.graded {
            return None;
        }
        let correct = self
            .evaluate()
            .into_iter()
            .filter(|v| *v == Verdict::Correct)
            .count();
        Some(Score::from_counts(correct, self.questions.len()))
    }

    pub fn grade(&mut self) -> Result<Score, SessionError> {
        if self.graded {
            return Err(SessionError::SessionLocked);
        }
        self.graded = true;

        let correct = self
            .evaluate()
            .into_iter()
            .filter(|v| *v == Verdict::Correct)
            .count();
        let score = Score::from_counts(correct, self.questions.len());
        logger::log(&format!(
            "Graded bank '{}': {} correct of {}, score {}",
            self.bank_name,
            correct,
            self.questions.len(),
            score
        ));
        Ok(score)
    }
}
