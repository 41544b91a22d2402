mod seeded_dataset;
mod startup;
